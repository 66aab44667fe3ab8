// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use super::AgentSuggestion;

/// Separator the model is asked to put between generated system prompts
pub const AGENT_SEPARATOR: &str = "---AGENT---";

/// Markdown description of the discovered agent network
#[derive(Debug, Clone)]
pub struct NetworkContext {
    pub file_count: usize,
    pub sample_count: usize,
    pub markdown: String,
}

impl NetworkContext {
    /// Prompt asking for a JSON array of agent suggestions
    pub fn to_suggestions_prompt(&self) -> String {
        format!(
            r#"You are an expert AI agent network architect. Analyze the provided multi-agent system and suggest complementary agents.

# Context
{context}

# Your Task

Generate a prioritized list of 5-10 agent suggestions that would enhance this network. Include both:
1. Orchestration & Routing Agents (coordinate workflows, manage priorities)
2. Action Agents (perform specific tasks)

For each suggestion, provide in JSON format:

{{
  "name": "agent-name",
  "type": "orchestration" or "action",
  "priority": "critical" or "high" or "medium" or "low",
  "purpose": "One sentence description",
  "rationale": "2-3 sentences explaining why this agent is needed",
  "responsibilities": ["responsibility 1", "responsibility 2", "responsibility 3"],
  "interfaces": "Which existing agents/systems this interacts with",
  "value": "Specific benefit this brings to the network"
}}

Output ONLY a valid JSON array of suggestions, ordered by priority (critical first, low last).
Begin:"#,
            context = self.markdown,
        )
    }

    /// Prompt asking for a free-form Markdown analysis report
    pub fn to_analysis_prompt(&self) -> String {
        format!(
            r#"You are an expert AI agent network architect. Analyze the provided multi-agent system configuration and suggest complementary agents.

# Your Task

Based on the agent network context provided, identify gaps and suggest new agents at two levels:

1. **Orchestration & Routing Agents**: Coordinate workflows, manage priorities, route tasks
2. **Action Agents**: Perform specific tasks and operations

# Analysis Framework

## Current State Assessment
- What agents currently exist?
- How do they interact?
- What patterns emerge?

## Gap Analysis
- What coordination is missing?
- What capabilities are absent?
- What error handling is needed?
- What monitoring is lacking?

## Recommendations

### Orchestration & Routing Agents
For each suggested orchestration agent, provide:
- **Agent Name**: Clear, descriptive name
- **Purpose**: What coordination role it serves
- **Responsibilities**: Specific duties
- **Interfaces With**: Which agents it coordinates
- **Value Add**: Why this improves the network

### Action Agents
For each suggested action agent, provide:
- **Agent Name**: Clear, descriptive name
- **Purpose**: What task it performs
- **Capabilities**: Specific functions
- **Triggers**: What activates this agent
- **Outputs**: What it produces
- **Value Add**: Why this agent is needed

## Implementation Priority
Rank suggestions by impact and implementation effort.

# Context

{context}

# Output Format

Provide your analysis in markdown format following this structure:

# Multi-Agent Network Analysis

## Executive Summary
[2-3 sentence overview]

## Current Agent Inventory
[List discovered agents]

## Agent Relationship Map
[Describe interactions]

## Recommendations

### Orchestration & Routing Agents
[Detailed suggestions]

### Action Agents
[Detailed suggestions]

## Implementation Priority
[Ranked list]

## Integration Considerations
[Implementation guidance]

Begin your analysis:"#,
            context = self.markdown,
        )
    }
}

/// Prompt asking for a production-ready system prompt for one accepted agent
pub fn agent_prompt_request(agent: &AgentSuggestion) -> String {
    format!(
        r#"Generate a detailed, production-ready system prompt for this AI agent:

**Agent Name**: {name}
**Type**: {agent_type}
**Purpose**: {purpose}
**Rationale**: {rationale}
**Responsibilities**: {responsibilities}
**Interfaces**: {interfaces}
**Value**: {value}

Create a comprehensive system prompt that includes:

1. **Role Definition**: Clear statement of the agent's role
2. **Core Responsibilities**: Detailed list of duties
3. **Operational Context**: How this agent fits in the network
4. **Input Specifications**: What inputs the agent expects
5. **Output Specifications**: What outputs the agent produces
6. **Interaction Protocols**: How it communicates with other agents
7. **Error Handling**: How it handles failures
8. **Success Criteria**: How to measure effectiveness
9. **Guidelines**: Operational principles and best practices

Format the prompt in clear markdown. Make it ready to use immediately.
Begin:"#,
        name = agent.name,
        agent_type = agent.agent_type,
        purpose = agent.purpose,
        rationale = agent.rationale,
        responsibilities = agent.responsibilities.join(", "),
        interfaces = agent.interfaces,
        value = agent.value,
    )
}

/// Prompt asking for system prompts of every agent recommended in an analysis
pub fn batch_prompts_request(analysis: &str) -> String {
    format!(
        r#"Based on this agent network analysis, generate detailed system prompts for each recommended agent.

For each agent, create a complete system prompt that includes:
- Role and purpose
- Specific responsibilities
- Input/output specifications
- Interaction protocols
- Error handling approach
- Success criteria

Analysis:
{analysis}

Generate system prompts in markdown format, one per agent. Separate each with "{separator}".
Format each prompt as:

# Agent: [Name]

## Role
[Description]

## Responsibilities
[List]

## Inputs
[Specification]

## Outputs
[Specification]

## Interaction Protocol
[How it works with other agents]

## Error Handling
[Approach]

## Success Criteria
[Metrics]

Begin generating system prompts:"#,
        analysis = analysis,
        separator = AGENT_SEPARATOR,
    )
}
