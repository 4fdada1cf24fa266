pub mod application {
    pub mod recipe {
        pub mod get_by_id;
        pub mod health_check;
        pub mod list_sources;
        pub mod orchestrator;
        pub mod search;
        pub mod search_by_ingredient;
        #[cfg(test)]
        pub(crate) mod test_support;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod recipe {
        pub mod errors;
        pub mod filters;
        pub mod model;
        pub mod source;
        pub mod value_objects;
        pub mod use_cases {
            pub mod get_by_id;
            pub mod health_check;
            pub mod list_sources;
            pub mod search;
            pub mod search_by_ingredient;
        }
    }
    pub mod shared {
        pub mod cache;
    }
}
