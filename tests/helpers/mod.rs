pub mod mock_subscriber;

pub mod app;
