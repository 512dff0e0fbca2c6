// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Function-calling tools exposed to the assistant
//!
//! The same executors back the `/api/tools/*` endpoints and the in-process
//! function calls made during a chat turn.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use super::errors::AssistantError;
use crate::booking::{parse_date, NumberOrText, StayCatalog, DEFAULT_TYPE_LIMIT};
use crate::llm::{FunctionCall, FunctionDeclaration, Tool};

pub const AVAILABILITY_TOOL: &str = "gerer_disponibilite";
pub const HOURS_TOOL: &str = "obtenir_horaires_service";

/// Payload returned for function calls this server does not implement
pub const UNHANDLED_WARNING: &str =
    "Fonction non gérée côté serveur; poursuivez sans cet outil.";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailabilityArgs {
    #[serde(default)]
    pub type_emplacement: Option<String>,
    #[serde(default)]
    pub date_debut: Option<String>,
    #[serde(default)]
    pub duree_jours: Option<NumberOrText>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HoursArgs {
    #[serde(default)]
    pub nom_service: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub result: String,
}

/// Declarations advertised to the model on every request
pub fn declarations() -> Vec<FunctionDeclaration> {
    vec![
        FunctionDeclaration {
            name: AVAILABILITY_TOOL.to_string(),
            description: "Récupère la disponibilité actuelle et les tarifs pour un type d'hébergement et une période demandée.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "type_emplacement": {
                        "type": "string",
                        "description": "Le type d'hébergement recherché (ex: Mobil-home, Emplacement, Chalet, etc.)"
                    },
                    "date_debut": {
                        "type": "string",
                        "description": "Date de début du séjour au format YYYY-MM-DD"
                    },
                    "duree_jours": {
                        "type": "integer",
                        "description": "Durée du séjour en nombre de nuits"
                    }
                },
                "required": ["type_emplacement", "date_debut", "duree_jours"]
            }),
        },
        FunctionDeclaration {
            name: HOURS_TOOL.to_string(),
            description: "Fournit les jours et heures d'ouverture pour les services spécifiques du camping.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "nom_service": {
                        "type": "string",
                        "description": "Le nom du service (ex: restaurant, réception, piscine, épicerie)"
                    }
                },
                "required": ["nom_service"]
            }),
        },
    ]
}

pub fn tool() -> Tool {
    Tool {
        function_declarations: declarations(),
    }
}

/// Amount in euros without trailing zeros (`270`, `45.5`)
pub fn format_amount(value: f64) -> String {
    let cents = (value * 100.0).round() / 100.0;
    format!("{}", cents)
}

/// Opening hours for a named campground service
pub fn service_hours(service: &str) -> String {
    let name = service.to_lowercase();
    let has = |keys: &[&str]| keys.iter().any(|k| name.contains(k));

    if has(&["restaurant", "bar"]) {
        "Le restaurant 'Le Sud' est ouvert tous les jours de 12h à 14h30 et de 19h à 22h30."
            .to_string()
    } else if has(&["piscine", "aquatique"]) {
        "L'espace aquatique est ouvert de 10h à 19h non-stop.".to_string()
    } else if has(&["réception", "accueil"]) {
        "La réception vous accueille de 8h à 20h en haute saison, et de 9h à 18h en basse saison."
            .to_string()
    } else if has(&["épicerie", "supermarché"]) {
        "L'épicerie est ouverte de 7h30 à 20h.".to_string()
    } else {
        format!(
            "Je n'ai pas les horaires spécifiques pour \"{}\". La réception est ouverte de 8h à 20h pour vous renseigner.",
            service
        )
    }
}

fn required(value: Option<&str>) -> Result<&str, AssistantError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(AssistantError::MissingParameters)
}

#[derive(Clone)]
pub struct ToolExecutor {
    catalog: StayCatalog,
    result_limit: usize,
}

impl ToolExecutor {
    pub fn new(catalog: StayCatalog) -> Self {
        Self {
            catalog,
            result_limit: DEFAULT_TYPE_LIMIT,
        }
    }

    pub async fn availability(&self, args: &AvailabilityArgs) -> Result<ToolOutput, AssistantError> {
        let type_query = required(args.type_emplacement.as_deref())?;
        let start = required(args.date_debut.as_deref())?;
        let nights = match &args.duree_jours {
            None => return Err(AssistantError::MissingParameters),
            Some(value) => match value.as_count() {
                Some(0) => return Err(AssistantError::MissingParameters),
                Some(n) => n,
                None => {
                    return Err(AssistantError::invalid(
                        "duree_jours",
                        "expected a whole number of nights",
                    ))
                }
            },
        };

        let start = parse_date(start)?;
        let (_, stays) = self
            .catalog
            .available_by_type(type_query, start, nights, self.result_limit)
            .await?;

        if stays.is_empty() {
            return Ok(ToolOutput {
                result: format!(
                    "Désolé, je n'ai trouvé aucun hébergement de type \"{}\" disponible pour ces dates.",
                    type_query
                ),
            });
        }

        let lines: Vec<String> = stays
            .iter()
            .map(|stay| {
                format!(
                    "{} ({} pers.) : {}€ pour {} nuits.",
                    stay.name,
                    stay.capacity,
                    format_amount(stay.base_price * f64::from(nights)),
                    nights
                )
            })
            .collect();

        Ok(ToolOutput {
            result: format!("Voici les disponibilités trouvées : {}", lines.join(" ")),
        })
    }

    pub fn hours(&self, args: &HoursArgs) -> Result<ToolOutput, AssistantError> {
        let service = required(args.nom_service.as_deref())?;
        Ok(ToolOutput {
            result: service_hours(service),
        })
    }

    pub fn handles(&self, name: &str) -> bool {
        name == AVAILABILITY_TOOL || name == HOURS_TOOL
    }

    /// Run a model function call. Returns `None` for tools this server does
    /// not implement. Tool failures are reported to the model as `{error}`.
    pub async fn execute(&self, call: &FunctionCall) -> Option<Value> {
        info!("Executing tool {} with {}", call.name, call.args);
        let outcome = match call.name.as_str() {
            AVAILABILITY_TOOL => {
                let args: AvailabilityArgs =
                    serde_json::from_value(call.args.clone()).unwrap_or_default();
                self.availability(&args).await
            }
            HOURS_TOOL => {
                let args: HoursArgs = serde_json::from_value(call.args.clone()).unwrap_or_default();
                self.hours(&args)
            }
            _ => return None,
        };

        Some(match outcome {
            Ok(output) => json!(output),
            Err(e) => {
                warn!("Tool {} failed: {}", call.name, e);
                json!({ "error": e.to_string() })
            }
        })
    }
}
