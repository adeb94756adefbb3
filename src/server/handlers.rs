//! MCP tool handlers for the registry server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.

use crate::domain::phone::canonicalize;
use crate::domain::{check_phone_number, classify_magnitude, PhoneCheck};
use crate::error::RegistryError;
use crate::models::{
    parse_membership_date, ContactChanges, NewContact, NewPerson, NewPersonnel, PersonnelChanges,
};
use crate::repositories::{ContactRepository, PersonRepository, PersonnelRepository};
use crate::services::{
    ContactService, ContactServiceImpl, PersonService, PersonServiceImpl, PersonnelService,
    PersonnelServiceImpl,
};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, error};

/// The registry MCP server that exposes person, contact and personnel tools.
#[derive(Clone)]
pub struct RegistryMcpServer {
    person_service: Arc<dyn PersonService>,
    contact_service: Arc<dyn ContactService>,
    personnel_service: Arc<dyn PersonnelService>,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for RegistryMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "registry-mcp-server".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("MCP server for a people registry - manages persons, their contact details and personnel attributes, validates FR/UK phone numbers and normalizes heights to meters.".into()),
        }
    }
}

// Helper structs for tool parameters
#[derive(Debug, Deserialize, JsonSchema)]
struct PersonIdParams {
    person_id: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CreatePersonParams {
    last_name: String,
    first_name: String,
    /// YYYY-MM-DD
    #[serde(default)]
    membership_date: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateMembershipDateParams {
    person_id: i64,
    /// YYYY-MM-DD; omit or leave blank to clear
    #[serde(default)]
    membership_date: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct FindPersonParams {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    phone: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ContactIdParams {
    contact_id: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CreateContactParams {
    person_id: i64,
    address: String,
    city: String,
    /// "FR" or "UK"
    country: String,
    phone_number: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateContactParams {
    contact_id: i64,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    phone_number: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct PersonnelIdParams {
    personnel_id: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CreatePersonnelParams {
    person_id: i64,
    age: u32,
    /// Height in meters, feet or centimeters
    height: f64,
    weight_kg: f64,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdatePersonnelParams {
    personnel_id: i64,
    #[serde(default)]
    age: Option<u32>,
    #[serde(default)]
    height: Option<f64>,
    #[serde(default)]
    weight_kg: Option<f64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ValidatePhoneParams {
    phone_number: String,
    country: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ConvertHeightParams {
    height: f64,
}

/// Map a registry error onto the MCP error code a client can act on.
fn to_mcp_error(e: RegistryError) -> McpError {
    let code = match &e {
        RegistryError::NotFound { .. } => ErrorCode::RESOURCE_NOT_FOUND,
        RegistryError::AlreadyExists(_)
        | RegistryError::Validation(_)
        | RegistryError::InvalidMagnitude(_) => ErrorCode::INVALID_PARAMS,
        RegistryError::Storage(_) | RegistryError::Task(_) => {
            error!("Tool call failed: {}", e);
            ErrorCode::INTERNAL_ERROR
        }
    };

    McpError {
        code,
        message: Cow::from(e.to_string()),
        data: Some(serde_json::json!({ "errors": e.messages() })),
    }
}

fn internal_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn json_result(value: &impl Serialize) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value).map_err(internal_error)?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[tool_router]
impl RegistryMcpServer {
    /// Create a new registry MCP server over the given repositories.
    pub fn new(
        person_repo: Arc<dyn PersonRepository>,
        contact_repo: Arc<dyn ContactRepository>,
        personnel_repo: Arc<dyn PersonnelRepository>,
        max_match_results: usize,
        match_confidence_threshold: u8,
    ) -> Self {
        let person_service = Arc::new(PersonServiceImpl::new(
            person_repo.clone(),
            contact_repo.clone(),
            personnel_repo.clone(),
            max_match_results,
            match_confidence_threshold,
        )) as Arc<dyn PersonService>;

        let contact_service = Arc::new(ContactServiceImpl::new(person_repo.clone(), contact_repo))
            as Arc<dyn ContactService>;

        let personnel_service = Arc::new(PersonnelServiceImpl::new(person_repo, personnel_repo))
            as Arc<dyn PersonnelService>;

        Self {
            person_service,
            contact_service,
            personnel_service,
            tool_router: Self::tool_router(),
        }
    }

    /// List every person in the registry.
    #[tool(description = "List every person in the registry, ordered by last name then first name")]
    async fn list_persons(&self) -> Result<CallToolResult, McpError> {
        let persons = self
            .person_service
            .list_persons()
            .await
            .map_err(to_mcp_error)?;

        json_result(&serde_json::json!({
            "count": persons.len(),
            "persons": persons,
        }))
    }

    /// Show a person with its contact and personnel records.
    #[tool(
        description = "Retrieve a person by ID together with their contact details and personnel attributes, if any"
    )]
    async fn get_person(
        &self,
        params: Parameters<PersonIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let details = self
            .person_service
            .get_person_details(params.0.person_id)
            .await
            .map_err(to_mcp_error)?;

        json_result(&details)
    }

    #[tool(description = "Create a new person with an optional membership date (YYYY-MM-DD)")]
    async fn create_person(
        &self,
        params: Parameters<CreatePersonParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let membership_date = parse_membership_date(params.membership_date.as_deref())
            .map_err(|e| to_mcp_error(e.into()))?;

        let person = self
            .person_service
            .create_person(NewPerson {
                last_name: params.last_name,
                first_name: params.first_name,
                membership_date,
            })
            .await
            .map_err(to_mcp_error)?;

        json_result(&person)
    }

    #[tool(
        description = "Set a person's membership date (YYYY-MM-DD). Omit the date or pass an empty string to clear it"
    )]
    async fn update_membership_date(
        &self,
        params: Parameters<UpdateMembershipDateParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let person = self
            .person_service
            .update_membership_date(params.person_id, params.membership_date)
            .await
            .map_err(to_mcp_error)?;

        json_result(&person)
    }

    /// Find persons with fuzzy name search or an exact phone match.
    #[tool(
        description = "Find persons using fuzzy name matching or an exact phone number match. Returns top matches with confidence scores"
    )]
    async fn find_person(
        &self,
        params: Parameters<FindPersonParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let response = self
            .person_service
            .find_person(params.name, params.phone)
            .await
            .map_err(to_mcp_error)?;

        json_result(&response)
    }

    #[tool(description = "Retrieve a contact by ID together with the person it belongs to")]
    async fn get_contact(
        &self,
        params: Parameters<ContactIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let details = self
            .contact_service
            .get_contact(params.0.contact_id)
            .await
            .map_err(to_mcp_error)?;

        json_result(&details)
    }

    /// Create the contact record of a person.
    #[tool(
        description = "Create the contact details of a person. A person has at most one contact; the phone number must be valid for the country (FR or UK)"
    )]
    async fn create_contact(
        &self,
        params: Parameters<CreateContactParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let contact = self
            .contact_service
            .create_contact(
                params.person_id,
                NewContact {
                    address: params.address,
                    city: params.city,
                    country: params.country,
                    phone_number: params.phone_number,
                },
            )
            .await
            .map_err(to_mcp_error)?;

        json_result(&contact)
    }

    #[tool(description = "Update a contact. Omitted fields keep their current value")]
    async fn update_contact(
        &self,
        params: Parameters<UpdateContactParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let contact = self
            .contact_service
            .update_contact(
                params.contact_id,
                ContactChanges {
                    address: params.address,
                    city: params.city,
                    country: params.country,
                    phone_number: params.phone_number,
                },
            )
            .await
            .map_err(to_mcp_error)?;

        json_result(&contact)
    }

    #[tool(description = "Retrieve personnel attributes by ID together with the person they belong to")]
    async fn get_personnel(
        &self,
        params: Parameters<PersonnelIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let details = self
            .personnel_service
            .get_personnel(params.0.personnel_id)
            .await
            .map_err(to_mcp_error)?;

        json_result(&details)
    }

    /// Create the personnel record of a person.
    #[tool(
        description = "Create the personnel attributes of a person. Height may be given in meters, feet or centimeters and is stored in meters"
    )]
    async fn create_personnel(
        &self,
        params: Parameters<CreatePersonnelParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let personnel = self
            .personnel_service
            .create_personnel(
                params.person_id,
                NewPersonnel {
                    age: params.age,
                    height: params.height,
                    weight_kg: params.weight_kg,
                },
            )
            .await
            .map_err(to_mcp_error)?;

        json_result(&personnel)
    }

    #[tool(
        description = "Update personnel attributes. Omitted fields keep their current value; a new height is normalized to meters"
    )]
    async fn update_personnel(
        &self,
        params: Parameters<UpdatePersonnelParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let personnel = self
            .personnel_service
            .update_personnel(
                params.personnel_id,
                PersonnelChanges {
                    age: params.age,
                    height: params.height,
                    weight_kg: params.weight_kg,
                },
            )
            .await
            .map_err(to_mcp_error)?;

        json_result(&personnel)
    }

    /// Check a phone number against a country's format.
    #[tool(
        description = "Check whether a phone number is valid for a country (FR or UK). Spaces and punctuation are ignored"
    )]
    async fn validate_phone_number(
        &self,
        params: Parameters<ValidatePhoneParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let result = check_phone_number(&params.phone_number, &params.country);
        debug!(country = %params.country, ?result, "Checked phone number");

        json_result(&serde_json::json!({
            "phone_number": params.phone_number,
            "canonical": canonicalize(&params.phone_number),
            "country": params.country,
            "valid": result == PhoneCheck::Valid,
            "result": result,
        }))
    }

    /// Normalize a height magnitude to meters.
    #[tool(
        description = "Convert a height given in meters (0.1-3), feet (3-10) or centimeters (30-300) to meters"
    )]
    async fn convert_height(
        &self,
        params: Parameters<ConvertHeightParams>,
    ) -> Result<CallToolResult, McpError> {
        let height = params.0.height;
        let unit = classify_magnitude(height).map_err(|e| to_mcp_error(e.into()))?;

        json_result(&serde_json::json!({
            "input": height,
            "unit": unit,
            "meters": unit.to_meters(height),
        }))
    }
}
