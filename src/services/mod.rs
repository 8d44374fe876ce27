// Docmark services
// Business rules for bookmarks and the settings that configure them.

pub mod bookmark_service;
pub mod settings_engine;
