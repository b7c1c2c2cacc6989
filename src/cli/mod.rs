pub mod call;
pub mod doctor;
