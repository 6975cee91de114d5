pub mod reagents;
