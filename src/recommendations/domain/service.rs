use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;
use async_trait::async_trait;
use tracing::debug;
use crate::books::repository::BookRepository;
use crate::circulation::repository::LoanRepository;
use crate::core::library::CirculationResult;
use crate::members::repository::MemberRepository;
use crate::recommendations::domain::RecommendationService;
use crate::recommendations::dto::RecommendationDto;

const PREFERRED_AUTHOR_BOOST: f64 = 1.5;
const HISTORY_AUTHOR_BOOST: f64 = 0.5;
const AVAILABLE_BOOST: f64 = 0.3;
const UNAVAILABLE_PENALTY: f64 = -1.0;

pub struct RecommendationServiceImpl {
    book_repository: Arc<dyn BookRepository>,
    member_repository: Arc<dyn MemberRepository>,
    loan_repository: Arc<dyn LoanRepository>,
}

impl RecommendationServiceImpl {
    pub fn new(book_repository: Arc<dyn BookRepository>,
               member_repository: Arc<dyn MemberRepository>,
               loan_repository: Arc<dyn LoanRepository>) -> Self {
        Self {
            book_repository,
            member_repository,
            loan_repository,
        }
    }
}

fn fold(value: &str) -> String {
    value.to_lowercase()
}

#[async_trait]
impl RecommendationService for RecommendationServiceImpl {
    async fn recommend(&self, member_id: &str, limit: usize) -> CirculationResult<Vec<RecommendationDto>> {
        let member = self.member_repository.get(member_id).await?;

        let mut history: HashSet<String> = member.loans.keys().cloned().collect();
        if history.is_empty() {
            // the member map is authoritative but can lag a direct ledger
            // write, so fall back to a full ledger scan
            history = self.loan_repository.find_by_member(member_id).await?
                .iter().map(|loan| loan.book_id.to_string()).collect();
        }

        let books = self.book_repository.find_all().await?;
        let mut interest_tags: HashSet<String> = member.preference_tags.iter()
            .map(|t| fold(t)).collect();
        let mut history_authors: HashSet<String> = HashSet::new();
        for book in books.iter().filter(|b| history.contains(&b.book_id)) {
            interest_tags.extend(book.tags.iter().map(|t| fold(t)));
            history_authors.insert(fold(book.author.as_str()));
        }
        let preferred_authors: HashSet<String> = member.preference_authors.iter()
            .map(|a| fold(a)).collect();

        let mut scored: Vec<RecommendationDto> = Vec::new();
        for book in books.iter().filter(|b| !history.contains(&b.book_id)) {
            let shared = book.tags.iter().filter(|t| interest_tags.contains(&fold(t))).count();
            let mut score = shared as f64;
            let author = fold(book.author.as_str());
            if preferred_authors.contains(&author) {
                score += PREFERRED_AUTHOR_BOOST;
            }
            if history_authors.contains(&author) {
                score += HISTORY_AUTHOR_BOOST;
            }
            score += if book.copies_available > 0 { AVAILABLE_BOOST } else { UNAVAILABLE_PENALTY };
            if score > 0.0 {
                scored.push(RecommendationDto {
                    book_id: book.book_id.to_string(),
                    title: book.title.to_string(),
                    author: book.author.to_string(),
                    score,
                });
            }
        }

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
            .then_with(|| a.title.cmp(&b.title))
            .then_with(|| a.book_id.cmp(&b.book_id)));
        scored.truncate(limit);
        debug!(member_id, count = scored.len(), "recommendations scored");
        Ok(scored)
    }
}
