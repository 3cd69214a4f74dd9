//! Walks a contact form through the typical user journey

use contact_form::{
    init_logging, ContactForm, ContactFormConfig, LoggingConfig, SubmitOutcome, EMAIL, FIRST_NAME,
    LAST_NAME, MESSAGE,
};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = ContactFormConfig::from_env()?;
    init_logging(LoggingConfig::with_level(config.log_level.clone()))?;

    let mut form = ContactForm::with_config(&config);
    form.on_errors_changed(|field, messages| {
        for message in messages {
            println!("  [{}] {}", field, message);
        }
    });

    println!("Typing a short first name:");
    form.set_value(FIRST_NAME, "123")?;

    println!("\nSubmitting with missing fields:");
    if let SubmitOutcome::Rejected(errors) = form.submit()? {
        println!("  rejected with {} error(s)", errors.total_errors());
    }

    println!("\nFixing every field:");
    form.set_value(FIRST_NAME, "warren")?;
    form.set_value(LAST_NAME, "longmire")?;
    form.set_value(EMAIL, "longmire@email.com")?;
    form.set_value(MESSAGE, "Hello from the demo")?;

    match form.submit()? {
        SubmitOutcome::Accepted(record) => {
            println!("\nSubmitted:");
            for (label, value) in record.display_entries() {
                println!("  {}: {}", label, value);
            }
            println!("\nAs JSON: {}", serde_json::to_string_pretty(&record)?);
        }
        SubmitOutcome::Rejected(errors) => println!("\nStill invalid:\n{}", errors),
    }

    Ok(())
}
