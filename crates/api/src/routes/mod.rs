pub mod availability;
pub mod health;
pub mod slots;
pub mod widget;
