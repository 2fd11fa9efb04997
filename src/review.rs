use tracing::info;

use crate::error::TripError;
use crate::gateway::Gateway;
use crate::models::ReviewDraft;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Review form scoped to one booked package.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewForm {
    pub place_id: String,
    pub user_id: String,
    pub rating: u8,
    pub comment: String,
}

impl ReviewForm {
    pub fn new(place_id: &str, user_id: &str) -> Self {
        Self {
            place_id: place_id.to_string(),
            user_id: user_id.to_string(),
            rating: MAX_RATING,
            comment: String::new(),
        }
    }

    pub fn validate(&self) -> Result<ReviewDraft, TripError> {
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(TripError::Validation(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }
        let comment = self.comment.trim();
        if comment.is_empty() {
            return Err(TripError::Validation("Please write a comment".to_string()));
        }
        Ok(ReviewDraft {
            place_id: self.place_id.clone(),
            user_id: self.user_id.clone(),
            rating: self.rating,
            comment: comment.to_string(),
        })
    }
}

/// Post the review. On success returns the package id to report upward.
pub async fn submit_review<G>(gateway: &G, form: &ReviewForm) -> Result<String, TripError>
where
    G: Gateway + ?Sized,
{
    let draft = form.validate()?;
    gateway.submit_review(&draft).await?;
    info!("Review stored for package {}", draft.place_id);
    Ok(draft.place_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_review_trims_comment() {
        let mut form = ReviewForm::new("pk1", "Asha");
        form.rating = 4;
        form.comment = "  Lovely trip  ".to_string();
        let draft = form.validate().unwrap();
        assert_eq!(draft.comment, "Lovely trip");
        assert_eq!(draft.rating, 4);
        assert_eq!(draft.place_id, "pk1");
    }

    #[test]
    fn test_rating_out_of_range_is_rejected() {
        let mut form = ReviewForm::new("pk1", "Asha");
        form.comment = "ok".to_string();
        for rating in [0, 6] {
            form.rating = rating;
            assert!(matches!(form.validate(), Err(TripError::Validation(_))), "rating {}", rating);
        }
    }

    #[test]
    fn test_blank_comment_is_rejected() {
        let mut form = ReviewForm::new("pk1", "Asha");
        form.comment = "   ".to_string();
        assert_eq!(
            form.validate(),
            Err(TripError::Validation("Please write a comment".to_string()))
        );
    }
}
