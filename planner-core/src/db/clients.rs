use anyhow::Result;
use rusqlite::{params, OptionalExtension, Row};

use super::Database;
use crate::error::PlanError;
use crate::models::{non_blank, Client, CreateClientInput, UpdateClientInput};

const CLIENT_COLUMNS: &str = "id, name, address, phone";

fn row_to_client(row: &Row<'_>) -> rusqlite::Result<Client> {
    Ok(Client {
        id: row.get("id")?,
        name: row.get("name")?,
        address: row.get("address")?,
        phone: row.get("phone")?,
    })
}

fn required_name(name: &str) -> Result<String, PlanError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PlanError::EmptyClientName);
    }
    Ok(name.to_string())
}

impl Database {
    /// All clients, alphabetical regardless of case.
    pub fn list_clients(&self) -> Result<Vec<Client>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients ORDER BY name COLLATE NOCASE, id"
        ))?;
        let clients = stmt
            .query_map([], row_to_client)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(clients)
    }

    pub fn get_client(&self, id: i64) -> Result<Option<Client>> {
        let conn = self.connection()?;
        let client = conn
            .query_row(
                &format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = ?1"),
                params![id],
                row_to_client,
            )
            .optional()?;
        Ok(client)
    }

    pub fn create_client(&self, input: CreateClientInput) -> Result<Client> {
        let name = required_name(&input.name)?;
        let address = non_blank(input.address);
        let phone = non_blank(input.phone);

        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO clients (name, address, phone) VALUES (?1, ?2, ?3)",
            params![name, address, phone],
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!(id, %name, "client created");

        Ok(Client {
            id,
            name,
            address,
            phone,
        })
    }

    /// Returns `false` when no client has this id.
    pub fn update_client(&self, id: i64, input: UpdateClientInput) -> Result<bool> {
        let name = required_name(&input.name)?;
        let conn = self.connection()?;
        let changed = conn.execute(
            "UPDATE clients SET name = ?1, address = ?2, phone = ?3 WHERE id = ?4",
            params![name, non_blank(input.address), non_blank(input.phone), id],
        )?;
        if changed == 0 {
            tracing::debug!(id, "update skipped, client not found");
        }
        Ok(changed > 0)
    }

    /// Removes the client together with every visit planned for it.
    pub fn delete_client(&self, id: i64) -> Result<bool> {
        let mut conn = self.connection()?;
        let tx = conn.transaction()?;
        let assignments = tx.execute(
            "DELETE FROM plan_assignments WHERE client_id = ?1",
            params![id],
        )?;
        let deleted = tx.execute("DELETE FROM clients WHERE id = ?1", params![id])?;
        tx.commit()?;

        tracing::info!(id, assignments, "client deleted");
        Ok(deleted > 0)
    }
}
