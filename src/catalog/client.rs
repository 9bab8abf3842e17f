//! Typed client for the catalog REST API.
//!
//! All paths are relative, so requests made through the shared client are
//! eligible for debug tagging.

use serde::Serialize;

use super::error::CatalogError;
use super::models::{NewTool, RawTool, Tool};
use crate::traits::{HttpClient, Request, Response};

const TOOLS_PATH: &str = "/tools";
const CATEGORIES_PATH: &str = "/kategorier";

#[derive(Serialize)]
struct NewCategory<'a> {
    name: &'a str,
}

/// Client for tools and categories.
pub struct CatalogClient<C> {
    http: C,
}

impl<C: HttpClient> CatalogClient<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    /// `GET /tools`
    pub async fn list_tools(&self) -> Result<Vec<Tool>, CatalogError> {
        let request = Request::get(TOOLS_PATH).with_header("Content-Type", "application/json");
        let response = expect_success(self.http.send(request).await?, None)?;
        let raw: Vec<RawTool> = response.json()?;
        let tools: Vec<Tool> = raw.into_iter().map(Tool::from).collect();
        tracing::debug!("Loaded {} tools", tools.len());
        Ok(tools)
    }

    /// `POST /tools`
    pub async fn create_tool(&self, tool: &NewTool) -> Result<(), CatalogError> {
        tool.validate()?;
        let request = Request::post(TOOLS_PATH).with_json(tool)?;
        expect_success(self.http.send(request).await?, Some(&tool.name))?;
        tracing::info!("Created tool '{}'", tool.name);
        Ok(())
    }

    /// Replace a tool: delete the old entry, then create the new one. Nothing
    /// is created when the delete fails.
    pub async fn replace_tool(&self, old_name: &str, tool: &NewTool) -> Result<(), CatalogError> {
        tool.validate()?;
        self.delete_tool(old_name).await?;
        self.create_tool(tool).await
    }

    /// `DELETE /tools/{name}`
    pub async fn delete_tool(&self, name: &str) -> Result<(), CatalogError> {
        let path = format!("{}/{}", TOOLS_PATH, urlencoding::encode(name));
        expect_success(self.http.send(Request::delete(path)).await?, None)?;
        tracing::info!("Deleted tool '{}'", name);
        Ok(())
    }

    /// `GET /kategorier`
    pub async fn list_categories(&self) -> Result<Vec<String>, CatalogError> {
        let response = expect_success(self.http.send(Request::get(CATEGORIES_PATH)).await?, None)?;
        Ok(response.json()?)
    }

    /// `POST /kategorier` with the trimmed name.
    pub async fn create_category(&self, name: &str) -> Result<(), CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::InvalidInput(vec!["name".to_string()]));
        }
        let request = Request::post(CATEGORIES_PATH).with_json(&NewCategory { name })?;
        expect_success(self.http.send(request).await?, Some(name))?;
        tracing::info!("Created category '{}'", name);
        Ok(())
    }

    /// `DELETE /kategorier/{name}`, refused while any of `tools` uses it.
    pub async fn delete_category(&self, name: &str, tools: &[Tool]) -> Result<(), CatalogError> {
        let count = tools
            .iter()
            .filter(|tool| tool.categories.iter().any(|c| c == name))
            .count();
        if count > 0 {
            return Err(CatalogError::InUse {
                category: name.to_string(),
                count,
            });
        }
        let path = format!("{}/{}", CATEGORIES_PATH, urlencoding::encode(name));
        expect_success(self.http.send(Request::delete(path)).await?, None)?;
        tracing::info!("Deleted category '{}'", name);
        Ok(())
    }
}

/// Turn non-2xx responses into errors. `created` names the resource being
/// created, which makes duplicate-name replies a [`CatalogError::Conflict`].
fn expect_success(response: Response, created: Option<&str>) -> Result<Response, CatalogError> {
    if response.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    if let Some(name) = created {
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_default();
        if response.status == 409
            || message.contains("already exists")
            || message.contains("duplicate")
        {
            return Err(CatalogError::Conflict(name.to_string()));
        }
    }

    Err(CatalogError::Status {
        status: response.status,
        body,
    })
}
