pub mod map;
pub mod panels;
pub mod popup;
pub mod table;
