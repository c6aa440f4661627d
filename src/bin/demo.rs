use circulation::books::dto::BookDto;
use circulation::core::domain::Configuration;
use circulation::core::library::{CirculationError, WaitlistAction};
use circulation::core::money::Money;
use circulation::engine::CirculationEngine;
use circulation::members::dto::MemberDto;

fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // the demo narrates through println, keep log lines short
        .with_target(false)
        .init();
}

async fn seed_catalog(engine: &CirculationEngine) -> Result<Vec<String>, CirculationError> {
    let books = vec![
        BookDto::new("9780441013593", "Dune", "Frank Herbert", "sci-fi", 3)
            .with_tags(&["sci-fi", "classic"]),
        BookDto::new("9780132350884", "Clean Code", "Robert C. Martin", "software", 2)
            .with_tags(&["software", "craft"]),
        BookDto::new("9780547928227", "The Hobbit", "J. R. R. Tolkien", "fantasy", 2)
            .with_tags(&["fantasy", "classic"]),
        BookDto::new("9780135957059", "The Pragmatic Programmer", "David Thomas", "software", 1)
            .with_tags(&["software", "craft"]),
        BookDto::new("9780061120084", "To Kill a Mockingbird", "Harper Lee", "fiction", 2)
            .with_tags(&["classic"]),
        BookDto::new("9780451524935", "1984", "George Orwell", "fiction", 2)
            .with_tags(&["classic", "dystopia"]),
    ];
    let mut ids = Vec::new();
    for book in &books {
        ids.push(engine.catalog.add_book(book).await?.book_id);
    }
    Ok(ids)
}

async fn seed_members(engine: &CirculationEngine) -> Result<Vec<String>, CirculationError> {
    let members = vec![
        MemberDto::new("Matthew", "matthew@example.com")
            .with_preferences(&["sci-fi", "fantasy"], &["Frank Herbert"]),
        MemberDto::new("Rood", "rood@example.com"),
        MemberDto::new("Eliza", "eliza@example.com"),
        MemberDto::new("Abi", "abi@example.com"),
        MemberDto::new("Dempwolf", "dempwolf@example.com"),
    ];
    let mut ids = Vec::new();
    for member in &members {
        ids.push(engine.members.add_member(member).await?.member_id);
    }
    Ok(ids)
}

#[tokio::main]
async fn main() -> Result<(), CirculationError> {
    setup_tracing();
    let engine = CirculationEngine::new(Configuration::new());

    let books = seed_catalog(&engine).await?;
    let members = seed_members(&engine).await?;
    let (dune, hobbit) = (books[0].as_str(), books[2].as_str());
    let (matthew, rood, eliza) = (members[0].as_str(), members[1].as_str(), members[2].as_str());

    println!("== circulation demo ==");
    println!("catalog: {} titles, members: {}", books.len(),
             engine.members.member_count(true).await?);

    let loan = engine.borrow_book(matthew, dune).await?;
    println!("Matthew borrowed Dune, due {}", loan.due_at.date());

    // soak up the remaining Dune copies so reservations queue up
    engine.borrow_book(rood, dune).await?;
    engine.borrow_book(eliza, dune).await?;
    let reserved = engine.reserve(members[3].as_str(), dune).await?;
    println!("Abi reserve outcome: {}", reserved.outcome);
    let waitlisted = engine.reserve(members[4].as_str(), dune).await?;
    println!("Dempwolf reserve outcome: {}", waitlisted.outcome);
    let notified = engine.manage_waitlist(dune, None, WaitlistAction::Notify).await?;
    println!("waitlist notify: {} ({:?})", notified.outcome, notified.notified);

    let receipt = engine.return_book(matthew, dune).await?;
    println!("Matthew returned Dune, fine {}, balance {}", receipt.fine, receipt.balance);
    if receipt.balance.is_positive() {
        let payment = engine.pay_balance(matthew, Money::from_major(5.0)).await?;
        println!("Matthew paid {}, balance now {}", payment.applied, payment.balance);
    }

    engine.borrow_book(matthew, hobbit).await?;
    engine.rate_book(matthew, dune, 5).await?;
    engine.rate_book(rood, dune, 4).await?;
    println!("Dune average rating now {}",
             engine.ratings.average_rating(dune).await?.unwrap_or_default());

    for rec in engine.recommend(matthew).await? {
        println!("recommended for Matthew: {} by {} (score {:.1})", rec.title, rec.author, rec.score);
    }

    let report = engine.generate_borrowing_report().await?;
    println!("report: {} loans ({} active, {} returned), {} overdue, fines {}",
             report.total_loans, report.active_loans, report.returned_loans,
             report.overdue_loans, report.total_fines);
    if let Some(top) = report.most_borrowed_book {
        println!("most borrowed book id: {}", top);
    }
    Ok(())
}
