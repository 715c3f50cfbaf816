/// Macro to generate the `sqlx::Error` conversion for a service error
///
/// Usage:
/// ```ignore
/// impl_service_error_conversions!(UserServiceError, StorageError);
/// ```
#[macro_export]
macro_rules! impl_service_error_conversions {
  ($error_type:ty, $storage_variant:ident) => {
    impl From<sqlx::Error> for $error_type {
      fn from(err: sqlx::Error) -> Self {
        <$error_type>::$storage_variant(format!("Database error: {}", err))
      }
    }
  };
}
