pub mod analysis_logger;
pub mod check_illumination_use_case;
pub mod frame_scheduler;
pub mod infrastructure;
pub mod result_sink;
