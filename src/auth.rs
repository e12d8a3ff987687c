//! Role gating for mutating actions.
//!
//! The core does not authenticate anyone; the embedding host does and exposes
//! the outcome through [`AuthGate`]. The dashboard only asks one question:
//! may the current user add, edit, delete, or export.

use crate::domain::error::{CatalogError, Result};

/// The two roles the dashboard distinguishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Role {
    /// May add, edit, delete, and export.
    Admin,
    /// Read-only access to the catalog.
    #[default]
    Viewer,
}

impl Role {
    /// Whether this role may perform gated actions.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Source of the current role.
///
/// Token issuance, expiry, and renewal are the host's concern; the gate is
/// consulted synchronously before any gated action is even requested.
pub trait AuthGate {
    /// The role the current user holds right now.
    fn role(&self) -> Role;

    /// Rejects the action unless the current role is admin.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::RoleViolation`] naming the rejected action.
    fn ensure_admin(&self, action: &str) -> Result<()> {
        if self.role().is_admin() {
            Ok(())
        } else {
            tracing::warn!(action, "gated action rejected for viewer");
            Err(CatalogError::RoleViolation {
                action: action.to_string(),
            })
        }
    }
}

/// Fixed-role gate for embedding hosts and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticAuthGate {
    role: Role,
}

impl StaticAuthGate {
    /// Creates a gate that always reports `role`.
    #[must_use]
    pub const fn new(role: Role) -> Self {
        Self { role }
    }

    /// Convenience for an admin gate.
    #[must_use]
    pub const fn admin() -> Self {
        Self::new(Role::Admin)
    }

    /// Convenience for a viewer gate.
    #[must_use]
    pub const fn viewer() -> Self {
        Self::new(Role::Viewer)
    }
}

impl AuthGate for StaticAuthGate {
    fn role(&self) -> Role {
        self.role
    }
}
