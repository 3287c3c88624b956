pub mod lister;
