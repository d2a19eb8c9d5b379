pub mod physical_item_state;

pub use physical_item_state::PhysicalItemState;
