pub mod files_service;
