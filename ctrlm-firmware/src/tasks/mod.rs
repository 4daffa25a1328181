// Task-Modul: Enthält alle Embassy Tasks

pub mod ctrlm_tester;

// Re-export Tasks für einfachen Import
pub use ctrlm_tester::ctrlm_tester_task;
