pub mod steps;
pub mod stepper;
