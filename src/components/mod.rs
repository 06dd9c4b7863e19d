pub mod file_upload;
pub mod research_map;
pub mod search_bar;
pub mod sidebar;
pub mod uploaded_file;
