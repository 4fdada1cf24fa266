pub mod db;
pub mod recipe {
    pub mod entity;
    pub mod source;
}
