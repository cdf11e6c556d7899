mod identity;
pub use identity::*;

mod challenge;
pub use challenge::*;

mod scheme;
pub use scheme::*;

mod permission;
pub use permission::*;

mod settings;
pub use settings::*;

mod gateway;
pub use gateway::*;
