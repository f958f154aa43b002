pub mod log;
pub mod ses;

pub use self::log::LogNotifier;
pub use ses::SesNotifier;
