// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Assistant settings persisted as a small JSON file

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::errors::AssistantError;

/// System instruction used until an administrator saves another one
pub const DEFAULT_INSTRUCTION: &str = r#"## 🏕️ Instruction Système pour l'Assistant Vocal Centre naturiste René OLTRA

**Rôle :** Vous êtes "René", l'assistant vocal IA amical et professionnel du "Centre naturiste René OLTRA".

**Objectif :** Votre mission principale est d'assister les clients dans leur processus de réservation en répondant à leurs questions et en les guidant.

**Langue :** Vous devez toujours répondre en **français de France** (utilisez le vouvoiement standard pour un ton professionnel).

### Sources d'Information (RAG - Recherche de Fichiers)

1.  **Priorité Absolue :** Vous avez accès à une base de connaissances (File Search) contenant les **FAQ**, les **Conditions Générales de Vente (CGV)**, et les **Termes d'Utilisation**. Utilisez cette base pour répondre aux questions sur ces sujets.
2.  **Si l'information est dans le RAG :** Intégrez la réponse de manière fluide et naturelle dans la conversation vocale.

### Outils Fonctionnels (Function Calling)

Vous disposez d'outils externes pour accéder aux données dynamiques. **Vous devez utiliser ces outils pour répondre à toutes les questions sur :**

* La **disponibilité** des emplacements/sites de camping.
* Les **dates d'ouverture** du camping, du restaurant ou d'autres services.
* Les **tarifs** de réservation.

**Implémentation des Outils :**

| Nom de l'Outil (Tool Name) | Description pour l'IA | Paramètres nécessaires |
| :--- | :--- | :--- |
| `gerer_disponibilite` | Récupère la disponibilité actuelle et les tarifs pour un type d'hébergement et une période demandée. | `type_emplacement: string`, `date_debut: string`, `duree_jours: int` |
| `obtenir_horaires_service` | Fournit les jours et heures d'ouverture pour les services spécifiques du camping (restaurant, piscine, réception, etc.). | `nom_service: string` (ex: "restaurant", "réception") |

### Contraintes et Style de Conversation

* **Concision Vocale :** Les réponses doivent être **courtes, claires et conversationnelles**. Évitez les longs monologues.
* **Vitesse :** Répondez rapidement et avec une latence minimale.
* **Neutralité :** Maintenez un ton toujours courtois, positif et serviable.
* **Fin de conversation :** À la fin d'une réponse, terminez par une question ouverte pour maintenir la conversation : "Puis-je vous aider avec autre chose concernant votre séjour ?"

**Phrase d'accueil :** "Bonjour ! Je suis René, l'assistant vocal du Centre naturiste René OLTRA. En quoi puis-je vous être utile aujourd'hui ?"
"#;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantSettings {
    pub system_instruction: String,
    pub file_search_store_name: Option<String>,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            system_instruction: DEFAULT_INSTRUCTION.to_string(),
            file_search_store_name: None,
        }
    }
}

/// Body of a settings update; both fields optional so validation can
/// report a missing instruction itself.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    #[serde(default)]
    pub system_instruction: Option<String>,
    #[serde(default)]
    pub file_search_store_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSettings {
    #[serde(default)]
    system_instruction: Option<String>,
    #[serde(default)]
    file_search_store_name: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub struct SettingsStore {
    path: Option<PathBuf>,
    // Serializes writers; in-memory mode also keeps the value here.
    state: Mutex<Option<AssistantSettings>>,
}

impl SettingsStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
            state: Mutex::new(None),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            state: Mutex::new(None),
        }
    }

    /// Current settings. Missing or invalid files yield the defaults.
    pub async fn load(&self) -> AssistantSettings {
        let state = self.state.lock().await;
        let Some(path) = &self.path else {
            return state.clone().unwrap_or_default();
        };

        let stored = match tokio::fs::read(path).await {
            Ok(bytes) => match serde_json::from_slice::<StoredSettings>(&bytes) {
                Ok(stored) => stored,
                Err(e) => {
                    warn!("Invalid assistant settings {}: {}", path.display(), e);
                    StoredSettings::default()
                }
            },
            Err(e) => {
                debug!("Assistant settings not readable ({}), using defaults", e);
                StoredSettings::default()
            }
        };

        AssistantSettings {
            system_instruction: non_blank(stored.system_instruction)
                .unwrap_or_else(|| DEFAULT_INSTRUCTION.to_string()),
            file_search_store_name: non_blank(stored.file_search_store_name),
        }
    }

    pub async fn save(&self, update: SettingsUpdate) -> Result<AssistantSettings, AssistantError> {
        let system_instruction =
            non_blank(update.system_instruction).ok_or(AssistantError::MissingInstruction)?;
        let settings = AssistantSettings {
            system_instruction,
            file_search_store_name: non_blank(update.file_search_store_name),
        };

        let mut state = self.state.lock().await;
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            let json = serde_json::to_vec_pretty(&settings)?;
            tokio::fs::write(path, json).await?;
        }
        *state = Some(settings.clone());

        info!(
            "Assistant settings saved ({} chars of instruction)",
            settings.system_instruction.chars().count()
        );
        Ok(settings)
    }
}
