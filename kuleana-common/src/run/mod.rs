mod start_process_request;

pub use start_process_request::StartProcessRequest;
