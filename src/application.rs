pub mod entry_point;
pub mod service_container;

#[cfg(test)]
pub(crate) mod mock_services;
