mod package_manager_resolver;

pub use package_manager_resolver::PackageManagerResolver;
