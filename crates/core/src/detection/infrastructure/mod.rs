pub mod landmark_file_detector;
