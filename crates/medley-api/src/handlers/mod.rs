pub mod file_delete;
pub mod file_download;
pub mod file_get;
pub mod file_upload;
pub mod files_list;
pub mod health;
pub mod metadata_get;
pub mod search;
