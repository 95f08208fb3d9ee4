pub mod encode;
pub mod train;
