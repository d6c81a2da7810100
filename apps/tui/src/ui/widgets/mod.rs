pub mod beacon;
pub mod charts;
pub mod floor_map;
pub mod popup;
pub mod tables;
