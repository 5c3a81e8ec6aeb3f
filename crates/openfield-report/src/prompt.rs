/// Builds the instruction prompt around a rendered data summary.
///
/// The model is asked for a Markdown report with four sections. Section 2
/// requests significance estimates as a table; these are the model's own
/// inference from mean, SEM and n, and the prompt requires the report to say so.
#[must_use]
pub fn build_prompt(data_summary: &str) -> String {
    format!(
        r"You are an expert in biostatistics and behavioral neuroscience. Analyze the following Open Field Test data.

{data_summary}
Write a detailed analysis report in Markdown with the following sections:

### 1. Descriptive statistics
Briefly describe how each group performs on the main metrics (total distance, center time, velocity).

### 2. Pairwise comparison (estimated)
**Important**: based on Mean ± SEM and the sample size n, reason about whether the groups differ
significantly (especially the control group versus every other group).
* **Use a Markdown table** for the comparison results, formatted like this:

| Comparison (Group A vs B) | Metric | Estimated significance | Reasoning (from Mean/SEM) |
| :--- | :--- | :--- | :--- |
| Control vs Model | Total Distance | *** (significant) | Large mean difference, error bars do not overlap |
| ... | ... | ... | ... |

*Label each row as significant (p<0.05), highly significant (p<0.01) or not significant (ns).
State clearly that these are AI estimates from summary statistics, not computed tests.*

### 3. Behavioral interpretation
Interpret the results using the principles of the open field test:
* **Anxiety-like behavior**: focus on center time and center entries.
* **Locomotion and exploration**: focus on total distance and velocity.

### 4. Conclusion
A short, precise conclusion.

Tone: rigorous, academic, objective.
"
    )
}
