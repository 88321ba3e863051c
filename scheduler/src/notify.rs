use common::env_config::SmtpConfig;
use common::error::{AppError, Res};
use db::models::invoice::OverdueInvoice;
use db::models::subscription::ExpiringSubscription;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

/// Sink for lifecycle notifications. Implementations must be safe to call
/// from the scheduler's blocking context.
pub trait Notify: Send + Sync {
    fn subscription_expiring(&self, sub: &ExpiringSubscription, days_left: i64) -> Res<()>;
    fn invoice_overdue(&self, invoice: &OverdueInvoice) -> Res<()>;
}

/// Sends notifications over SMTP (STARTTLS relay).
pub struct SmtpNotifier {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpNotifier {
    pub fn new(config: &SmtpConfig) -> Res<Self> {
        let transport = SmtpTransport::starttls_relay(&config.host)
            .map_err(|err| AppError::Internal(format!("SMTP relay setup failed: {err}")))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();
        let from = config
            .from
            .parse()
            .map_err(|err| AppError::Internal(format!("Invalid SMTP from address: {err}")))?;
        Ok(SmtpNotifier { transport, from })
    }

    fn send(&self, to: &str, subject: &str, body: String) -> Res<()> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to
                .parse()
                .map_err(|err| AppError::Internal(format!("Invalid recipient address: {err}")))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|err| AppError::Internal(format!("Failed to build email: {err}")))?;
        self.transport
            .send(&message)
            .map_err(|err| AppError::Internal(format!("Failed to send email: {err}")))?;
        Ok(())
    }
}

impl Notify for SmtpNotifier {
    fn subscription_expiring(&self, sub: &ExpiringSubscription, days_left: i64) -> Res<()> {
        self.send(
            &sub.customer_email,
            "Your subscription is expiring soon",
            format!(
                "Hello {},\n\nYour {:?} subscription expires on {} ({} day(s) left).\n\
                 Please renew to keep access to your dashboard.\n",
                sub.customer_name,
                sub.plan,
                sub.end_date.format("%Y-%m-%d"),
                days_left,
            ),
        )
    }

    fn invoice_overdue(&self, invoice: &OverdueInvoice) -> Res<()> {
        let due = invoice
            .due_date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unknown".to_string());
        self.send(
            &invoice.customer_email,
            "Overdue service invoice",
            format!(
                "Hello {},\n\nThe {} invoice for unit {} in {} ({} EGP) was due on {}.\n\
                 Please settle it at your earliest convenience.\n",
                invoice.customer_name,
                invoice.service_type,
                invoice.unit_number,
                invoice.building_name,
                invoice.amount,
                due,
            ),
        )
    }
}

/// Logs instead of sending. Used when SMTP is disabled, typically in
/// development.
pub struct LogNotifier;

impl Notify for LogNotifier {
    fn subscription_expiring(&self, sub: &ExpiringSubscription, days_left: i64) -> Res<()> {
        log::info!(
            "Expiry warning for {} <{}>: {:?} plan ends {} ({} day(s) left)",
            sub.customer_name,
            sub.customer_email,
            sub.plan,
            sub.end_date,
            days_left,
        );
        Ok(())
    }

    fn invoice_overdue(&self, invoice: &OverdueInvoice) -> Res<()> {
        log::info!(
            "Overdue reminder for {} <{}>: {} invoice on unit {} ({} EGP)",
            invoice.customer_name,
            invoice.customer_email,
            invoice.service_type,
            invoice.unit_number,
            invoice.amount,
        );
        Ok(())
    }
}
