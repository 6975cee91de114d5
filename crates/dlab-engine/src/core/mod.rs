pub mod mixing;
pub mod vessel;
