// Docmark persistence stores
// Stores own the durable copy of each record; services never touch SQL directly.

pub mod bookmark_store;
