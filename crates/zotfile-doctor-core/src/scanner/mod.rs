pub mod walk;

pub use walk::build_dir_set;
