use async_trait::async_trait;

use super::HostedClient;
use super::query::eq;
use super::rows::{IdentityRow, NewIdentityRow};
use crate::repository::{BackendError, IdentityRepository};
use portal_core::model::{Identity, Role, UserId};

#[async_trait]
impl IdentityRepository for HostedClient {
    async fn get_identity(&self, id: UserId) -> Result<Option<Identity>, BackendError> {
        let row: Option<IdentityRow> = self.select_one("users", &[("id", eq(id))]).await?;
        row.map(IdentityRow::into_identity).transpose()
    }

    async fn insert_identity(&self, identity: &Identity) -> Result<(), BackendError> {
        self.insert_row("users", &NewIdentityRow::from_identity(identity))
            .await
    }

    async fn list_students(&self) -> Result<Vec<Identity>, BackendError> {
        let rows: Vec<IdentityRow> = self
            .select_rows("users", &[("role", eq(Role::Student.as_str()))], None)
            .await?;
        rows.into_iter().map(IdentityRow::into_identity).collect()
    }
}
