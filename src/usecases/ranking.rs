const QUESTION_WEIGHT: f64 = 10.0;
const RATING_WEIGHT: f64 = 0.25;

fn round(x: f64, decimals: u32) -> f64 {
    let y = 10i32.pow(decimals) as f64;
    (x * y).round() / y
}

/// Question count dominates; combined contest rating breaks ties.
pub fn calculate_rank_score(
    leetcode_questions: u32,
    leetcode_rating: u32,
    codeforces_questions: u32,
    codeforces_rating: u32,
) -> f64 {
    let total_questions = leetcode_questions as f64 + codeforces_questions as f64;
    let total_rating = leetcode_rating as f64 + codeforces_rating as f64;

    let mut score = round(
        total_questions * QUESTION_WEIGHT + total_rating * RATING_WEIGHT,
        2,
    );
    if score.is_infinite() || score.is_nan() {
        score = 0.0;
    }

    score
}
