pub mod basin;
