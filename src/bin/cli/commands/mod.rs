pub mod activate;
pub mod days;
pub mod lesson;
pub mod practice;
pub mod quiz;
pub mod review;
pub mod status;
