use crate::job::JobPosting;

pub const TOP_SKILLS: usize = 10;

/// Skill-frequency summary over a finished batch, for reporting only.
/// Counts are collected in first-encountered order, then stable-sorted by
/// count descending, so ties keep their first-encountered order.
pub fn skill_frequencies(batch: &[JobPosting]) -> Vec<(String, u32)> {
    let mut counts: Vec<(String, u32)> = vec![];
    for posting in batch {
        for skill in &posting.skills {
            match counts.iter_mut().find(|(label, _)| label == skill) {
                Some((_, n)) => *n += 1,
                None => counts.push((skill.clone(), 1)),
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(TOP_SKILLS);
    counts
}
