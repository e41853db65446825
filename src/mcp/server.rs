//! FitTrack MCP Server Implementation
//!
//! Exposes the daily ledger session as MCP tools.

use std::path::PathBuf;
use std::sync::{Arc, MutexGuard};

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::db::Database;
use crate::ledger::{DailyLedger, SystemClock};
use crate::tools::ledger::{self, GoalsUpdate};
use crate::tools::status::StatusTracker;

/// The ledger session served by this process
pub type Ledger = DailyLedger<Database, SystemClock>;

/// FitTrack MCP Service
#[derive(Clone)]
pub struct FittrackService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    ledger: Arc<std::sync::Mutex<Ledger>>,
    tool_router: ToolRouter<FittrackService>,
}

impl FittrackService {
    pub fn new(database_path: PathBuf, ledger: Ledger) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            ledger: Arc::new(std::sync::Mutex::new(ledger)),
            tool_router: Self::tool_router(),
        }
    }

    fn lock_ledger(&self) -> Result<MutexGuard<'_, Ledger>, McpError> {
        self.ledger
            .lock()
            .map_err(|_| McpError::internal_error("Ledger lock poisoned", None))
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Meal Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddMealParams {
    /// What was eaten
    pub name: String,
    /// Servings eaten (default 1.0, must be > 0)
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    /// Protein in grams for the whole entry
    #[serde(default)]
    pub protein: f64,
    /// Carbohydrates in grams for the whole entry
    #[serde(default)]
    pub carbs: f64,
    /// Fat in grams for the whole entry
    #[serde(default)]
    pub fat: f64,
    /// Calories (kcal) for the whole entry, must be > 0
    pub calories: f64,
}

fn default_quantity() -> f64 { 1.0 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteMealParams {
    /// Meal ID from get_today
    pub id: i64,
}

// ============================================================================
// Water / Sleep / Weight Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddWaterParams {
    /// Milliliters to add (negative to remove)
    pub amount_ml: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetWaterParams {
    /// New total for the day in milliliters
    pub water_ml: u32,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetSleepParams {
    /// Hours slept (0-24)
    pub hours: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetWeightParams {
    /// Weight with unit, e.g. "75kg" or "75000g"
    pub weight: String,
}

// ============================================================================
// Goals / History Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetGoalsParams {
    /// Daily protein goal in grams
    pub protein: Option<f64>,
    /// Daily carbohydrate goal in grams
    pub carbs: Option<f64>,
    /// Daily fat goal in grams
    pub fat: Option<f64>,
    /// Daily calorie goal in kcal
    pub calories: Option<f64>,
    /// Daily water goal in milliliters
    pub water: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetHistoryParams {
    /// Number of most recent days to return (default 7)
    pub days: Option<usize>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl FittrackService {
    // --- Status ---

    #[tool(description = "Get the current status of the FitTrack service including build info, database status, and process information")]
    async fn fittrack_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        json_result(&tracker.get_status())
    }

    #[tool(description = "Get instructions for using the daily ledger. Call this when starting a logging session or when unsure how meals, water, goals and history work.")]
    fn ledger_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::LEDGER_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(LEDGER_INSTRUCTIONS)]))
    }

    // --- Day ---

    #[tool(description = "Get today's ledger: meals, rounded totals, water, sleep, weight, goals and goal progress")]
    fn get_today(&self) -> Result<CallToolResult, McpError> {
        let session = self.lock_ledger()?;
        json_result(&ledger::get_today(&*session))
    }

    // --- Meals ---

    #[tool(description = "Log a meal for today. Nutrient values are totals for the entry, not per serving. Calories must be > 0.")]
    fn add_meal(&self, Parameters(p): Parameters<AddMealParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.lock_ledger()?;
        let result = ledger::add_meal(&mut *session, p.name, p.quantity, p.protein, p.carbs, p.fat, p.calories)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Delete a meal from today's ledger by ID and return the updated totals")]
    fn delete_meal(&self, Parameters(p): Parameters<DeleteMealParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.lock_ledger()?;
        json_result(&ledger::delete_meal(&mut *session, p.id))
    }

    // --- Water / Sleep / Weight ---

    #[tool(description = "Add water in milliliters (negative removes). The daily total never drops below zero.")]
    fn add_water(&self, Parameters(p): Parameters<AddWaterParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.lock_ledger()?;
        json_result(&ledger::add_water(&mut *session, p.amount_ml))
    }

    #[tool(description = "Set today's total water intake in milliliters")]
    fn set_water(&self, Parameters(p): Parameters<SetWaterParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.lock_ledger()?;
        json_result(&ledger::set_water(&mut *session, p.water_ml))
    }

    #[tool(description = "Set hours slept last night (0-24)")]
    fn set_sleep(&self, Parameters(p): Parameters<SetSleepParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.lock_ledger()?;
        let result = ledger::set_sleep(&mut *session, p.hours).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Record today's body weight, e.g. \"75kg\" or \"75000g\". Stored in kilograms (20-300 kg).")]
    fn set_weight(&self, Parameters(p): Parameters<SetWeightParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.lock_ledger()?;
        let result = ledger::set_weight(&mut *session, &p.weight).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Goals ---

    #[tool(description = "Update daily goals. Omitted fields keep their current value; all values must be > 0. Goals carry over to following days.")]
    fn set_goals(&self, Parameters(p): Parameters<SetGoalsParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.lock_ledger()?;
        let update = GoalsUpdate {
            protein: p.protein,
            carbs: p.carbs,
            fat: p.fat,
            calories: p.calories,
            water: p.water,
        };
        let result = ledger::set_goals(&mut *session, update).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get today's consumption as a percentage of each goal")]
    fn get_goal_progress(&self) -> Result<CallToolResult, McpError> {
        let session = self.lock_ledger()?;
        json_result(&ledger::get_goal_progress(&*session))
    }

    #[tool(description = "Get suggestions for calories and protein that are still under 90% of today's goals, with the remaining deficit")]
    fn get_suggestions(&self) -> Result<CallToolResult, McpError> {
        let session = self.lock_ledger()?;
        json_result(&ledger::get_suggestions(&*session))
    }

    // --- Quote / History ---

    #[tool(description = "Get today's motivation quote. The same quote is returned for the rest of the day.")]
    fn get_quote(&self) -> Result<CallToolResult, McpError> {
        let mut session = self.lock_ledger()?;
        json_result(&ledger::get_quote(&mut *session))
    }

    #[tool(description = "Get archived daily summaries (default last 7 days, oldest first) and the current protein goal streak")]
    fn get_history(&self, Parameters(p): Parameters<GetHistoryParams>) -> Result<CallToolResult, McpError> {
        let session = self.lock_ledger()?;
        json_result(&ledger::get_history(&*session, p.days))
    }
}

#[tool_handler]
impl ServerHandler for FittrackService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "fittrack".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("FitTrack Daily Ledger".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "FitTrack - daily nutrition ledger with rollover history. \
                 IMPORTANT: Call ledger_instructions before logging. \
                 Day: get_today, get_goal_progress. \
                 Meals: add_meal/delete_meal (nutrients are per entry, calories > 0). \
                 Body: add_water/set_water, set_sleep, set_weight (\"75kg\" or \"75000g\"). \
                 Goals: set_goals (carry over across days), get_suggestions. \
                 Review: get_history (with protein streak), get_quote. \
                 Status: fittrack_status."
                    .into(),
            ),
        }
    }
}
