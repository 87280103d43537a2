mod diarization_service_test;
mod title_service_test;
