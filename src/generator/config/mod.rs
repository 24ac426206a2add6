pub mod group;
pub mod identity;
pub mod remark;
