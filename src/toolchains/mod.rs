pub mod gnu;
pub mod msvc;
