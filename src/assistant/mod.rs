// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chatbot assistant: settings, tools and the chat loop

pub mod errors;
pub mod service;
pub mod settings;
pub mod tools;

pub use errors::AssistantError;
pub use service::{AssistantService, ChatReply, ChatRequest, CONTEXT_PASSAGES, NO_ANSWER};
pub use settings::{AssistantSettings, SettingsStore, SettingsUpdate, DEFAULT_INSTRUCTION};
pub use tools::{
    declarations, service_hours, AvailabilityArgs, HoursArgs, ToolExecutor, ToolOutput,
    AVAILABILITY_TOOL, HOURS_TOOL,
};
