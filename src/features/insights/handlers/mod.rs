pub mod insights_handler;
