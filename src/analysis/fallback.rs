//! Static answers used when the remote model is unavailable or unreliable.
//!
//! Selection is a pure function of (mode, perspective presence, topic):
//! the same request always produces byte-identical text.

use super::types::{AnalysisMode, ValidatedRequest};

/// Topic that has its own hand-written counterargument set.
pub const SPECIAL_CASE_TOPIC: &str = "India vs Pakistan Economy";

const PERSPECTIVE_PLACEHOLDER: &str = "General Perspective";

const INDIA_PAKISTAN_REBUTTAL: &str = r#"# Analysis: India vs Pakistan Economy Debate

## Counterarguments to "{perspective}"

### 1. Different Economic Structures
India and Pakistan have fundamentally different economic structures and development models. India has pursued a more diversified economic approach with strength in services, manufacturing, and agriculture, while Pakistan has historically focused more on agriculture and textile exports. This makes direct comparison challenging without accounting for these structural differences.

### 2. Population Scale Considerations
India's economy benefits from economies of scale with a population nearly 6 times larger than Pakistan's. When considering per capita metrics rather than absolute numbers, the gap narrows significantly in some indicators, which provides important context to economic comparisons.

### 3. External Factors and Geopolitics
Both economies have been shaped by different external relationships and geopolitical situations. Pakistan's strategic relationships with China, Gulf states, and periods of significant US aid present a different development context than India's path, making direct comparisons potentially misleading without this context.

### 4. Historical Starting Points
The two countries started from different positions after partition in 1947, with India inheriting more industrial infrastructure. This initial disparity has influenced development trajectories and should be considered when comparing current economic status.

### 5. Different Development Priorities
The countries have prioritized different sectors for development based on their unique challenges. Pakistan has focused more on security spending as a percentage of GDP, while India has emphasized technology services and manufacturing - reflecting different national priorities rather than simply economic performance."#;

const BALANCED_ARGUMENTS: &str = r#"# Balanced Arguments on {topic}

## Perspective 1: For
1. This perspective emphasizes important considerations around economic growth patterns and social development.
2. There are several strong indicators supporting this viewpoint, particularly in the areas of infrastructure development and resource utilization.
3. Historical precedent provides backing for these arguments across multiple regions and similar contexts.
4. The long-term sustainability of this approach has been demonstrated in several case studies from both developed and developing economies.

## Perspective 2: Against
1. Alternative approaches highlight different metrics that suggest other outcomes and pathways.
2. Critical analysis reveals potential weaknesses in the first perspective's assumptions about implementation and effectiveness.
3. Comparative studies show mixed results when implementing these policies across diverse socioeconomic conditions.
4. Different stakeholders may experience varying impacts that should be considered in a comprehensive analysis of costs and benefits."#;

const ARGUMENT_CRITIQUE: &str = r#"# Logical Fallacy Analysis for Topic: {topic}

## Identified Fallacies in the Argument

### 1. Hasty Generalization
The argument makes broad claims without sufficient evidence or data points. When discussing complex topics, more comprehensive evidence is needed to support such definitive statements.

**Why it's a fallacy:** Drawing conclusions based on insufficient samples leads to unreliable conclusions.

**How to strengthen:** Include specific data points from multiple sources and consider counterexamples.

### 2. Appeal to Authority
The argument relies on unnamed experts or authorities without providing specific citations or evidence. 

**Why it's a fallacy:** Expertise should be relevant and verifiable, and even experts can be wrong.

**How to strengthen:** Cite specific studies with methodologies, identify experts by name and relevant credentials, and explain why their position is compelling.

### 3. False Dichotomy
The topic is presented as having only two possible interpretations, when most complex issues involve multiple nuanced factors and perspectives.

**Why it's a fallacy:** It artificially limits the solution space and oversimplifies complex issues.

**How to strengthen:** Acknowledge the spectrum of positions and consider hybrid approaches that combine elements from different perspectives.

## Suggestions for Improvement

1. Incorporate specific evidence with verifiable sources
2. Acknowledge limitations and complexity in the topic
3. Consider multiple perspectives rather than binary positions
4. Use comparative analysis across multiple dimensions
5. Address potential objections proactively"#;

const FALLACY_CATALOGUE: &str = r#"# Common Logical Fallacies in Debates About {topic}

## 1. Cherry-picking Data
**Definition:** Selectively choosing data that supports one's argument while ignoring contradictory evidence.

**Example in this debate:** Highlighting only favorable indicators about {topic} while ignoring contradictory ones. For instance, emphasizing short-term benefits without addressing long-term consequences.

## 2. Post Hoc Ergo Propter Hoc (Correlation vs. Causation)
**Definition:** Assuming that because one event followed another, the first event caused the second.

**Example in this debate:** Attributing specific outcomes in {topic} solely to a particular policy without considering other factors or trends that may have contributed.

## 3. Appeal to Authority
**Definition:** Claiming something is true because an authority figure says it is, without providing additional evidence.

**Example in this debate:** Citing a famous expert's opinion on {topic} without examining their reasoning or evidence, especially when their expertise may not be specifically in the area being discussed.

## 4. False Equivalence
**Definition:** Comparing two things as if they are equivalent when they are not comparable in significant ways.

**Example in this debate:** Making direct comparisons within {topic} without accounting for fundamental differences in context, scale, or circumstances.

## 5. Slippery Slope
**Definition:** Arguing that a relatively small first step will inevitably lead to extreme consequences.

**Example in this debate:** Claiming that implementing a specific policy on {topic} will inevitably lead to extreme negative outcomes without evidence for such a causal chain.

## 6. Straw Man
**Definition:** Misrepresenting an opponent's argument to make it easier to attack.

**Example in this debate:** Deliberately mischaracterizing the opposing position on {topic} to make it appear weaker, rather than addressing their actual points and evidence."#;

/// Identifies which static text a request maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackKind {
    /// Five-point rebuttal for the special-case topic.
    TopicRebuttal,
    /// Generic two-sided arguments, topic in the heading only.
    BalancedArguments,
    /// Three-fallacy critique of the supplied argument.
    ArgumentCritique,
    /// Six-fallacy catalogue with topic-specific examples.
    FallacyCatalogue,
}

/// Immutable table of fallback texts, built once at startup.
#[derive(Debug, Clone)]
pub struct FallbackCatalog {
    special_topic: String,
    topic_rebuttal: &'static str,
    balanced_arguments: &'static str,
    argument_critique: &'static str,
    fallacy_catalogue: &'static str,
}

impl Default for FallbackCatalog {
    fn default() -> Self {
        Self {
            special_topic: SPECIAL_CASE_TOPIC.to_lowercase(),
            topic_rebuttal: INDIA_PAKISTAN_REBUTTAL,
            balanced_arguments: BALANCED_ARGUMENTS,
            argument_critique: ARGUMENT_CRITIQUE,
            fallacy_catalogue: FALLACY_CATALOGUE,
        }
    }
}

impl FallbackCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide which text applies. Counterarguments ignore perspective
    /// presence when choosing; fallacies do not.
    pub fn kind_for(&self, mode: AnalysisMode, topic: &str, has_perspective: bool) -> FallbackKind {
        match mode {
            AnalysisMode::Counterarguments => {
                if topic.trim().to_lowercase() == self.special_topic {
                    FallbackKind::TopicRebuttal
                } else {
                    FallbackKind::BalancedArguments
                }
            }
            AnalysisMode::Fallacies if has_perspective => FallbackKind::ArgumentCritique,
            AnalysisMode::Fallacies => FallbackKind::FallacyCatalogue,
        }
    }

    /// Render the fallback text for a request.
    pub fn select(&self, request: &ValidatedRequest) -> String {
        let kind = self.kind_for(request.mode, &request.topic, request.has_perspective());
        match kind {
            FallbackKind::TopicRebuttal => self.topic_rebuttal.replace(
                "{perspective}",
                request
                    .perspective
                    .as_deref()
                    .unwrap_or(PERSPECTIVE_PLACEHOLDER),
            ),
            FallbackKind::BalancedArguments => {
                self.balanced_arguments.replace("{topic}", &request.topic)
            }
            FallbackKind::ArgumentCritique => {
                self.argument_critique.replace("{topic}", &request.topic)
            }
            FallbackKind::FallacyCatalogue => {
                self.fallacy_catalogue.replace("{topic}", &request.topic)
            }
        }
    }
}
