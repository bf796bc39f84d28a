pub mod flash;
pub mod link;
pub mod navigation;
