mod metadata_sidebar;

pub use metadata_sidebar::MetadataSidebar;
