use contact_relay_email_contracts::Email;
use contact_relay_models::{contact::ContactMessage, delivery::DeliveryConfig};

const HEADING: &str = "Nuevo mensaje desde el formulario de contacto";

/// Builds the notification email for a validated contact message.
pub fn email(config: &DeliveryConfig, message: &ContactMessage) -> Email {
    Email {
        from: config.from.clone(),
        to: vec![config.to.clone()],
        reply_to: Some(message.author.email.to_string()),
        subject: subject(message),
        text: text(message),
        html: html(message),
    }
}

fn subject(message: &ContactMessage) -> String {
    format!("Nuevo contacto de {}", *message.organization)
}

fn text(message: &ContactMessage) -> String {
    [
        HEADING.into(),
        format!("Nombre: {}", *message.author.name),
        format!("Email: {}", message.author.email),
        format!("Organización: {}", *message.organization),
        String::new(),
        "Mensaje:".into(),
        message.content.to_string(),
    ]
    .join("\n")
}

fn html(message: &ContactMessage) -> String {
    let content = escape_html(&message.content)
        .replace("\r\n", "\n")
        .replace('\n', "<br />");

    [
        format!("<h2>{HEADING}</h2>"),
        format!(
            "<p><strong>Nombre:</strong> {}</p>",
            escape_html(&message.author.name)
        ),
        format!(
            "<p><strong>Email:</strong> {}</p>",
            escape_html(message.author.email.as_str())
        ),
        format!(
            "<p><strong>Organización:</strong> {}</p>",
            escape_html(&message.organization)
        ),
        "<p><strong>Mensaje:</strong></p>".into(),
        format!("<p>{content}</p>"),
    ]
    .join("\n")
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use contact_relay_models::contact::ContactFormSubmission;
    use pretty_assertions::assert_eq;

    use super::*;

    fn message(organization: &str, content: &str) -> ContactMessage {
        ContactFormSubmission {
            name: "Ana".into(),
            email: "ana@x.com".into(),
            organization: organization.into(),
            message: content.into(),
            bot_field: "".into(),
        }
        .validate()
        .unwrap()
    }

    fn config() -> DeliveryConfig {
        DeliveryConfig {
            api_key: "re_key".into(),
            to: "contact@example.com".into(),
            from: "Web <web@example.com>".into(),
        }
    }

    #[test]
    fn compose() {
        let email = email(&config(), &message("ONG X", "Hola\nque tal"));

        assert_eq!(
            email,
            Email {
                from: "Web <web@example.com>".into(),
                to: vec!["contact@example.com".into()],
                reply_to: Some("ana@x.com".into()),
                subject: "Nuevo contacto de ONG X".into(),
                text: "Nuevo mensaje desde el formulario de contacto\n\
                       Nombre: Ana\n\
                       Email: ana@x.com\n\
                       Organización: ONG X\n\
                       \n\
                       Mensaje:\n\
                       Hola\n\
                       que tal"
                    .into(),
                html: "<h2>Nuevo mensaje desde el formulario de contacto</h2>\n\
                       <p><strong>Nombre:</strong> Ana</p>\n\
                       <p><strong>Email:</strong> ana@x.com</p>\n\
                       <p><strong>Organización:</strong> ONG X</p>\n\
                       <p><strong>Mensaje:</strong></p>\n\
                       <p>Hola<br />que tal</p>"
                    .into(),
            }
        );
    }

    #[test]
    fn html_line_breaks() {
        let html = html(&message("X", "a\r\nb\n\nc"));
        assert!(html.ends_with("<p>a<br />b<br /><br />c</p>"));
    }

    #[test]
    fn html_escapes_user_input() {
        let html = html(&message("<b>X</b> & Co", "<script>alert('x')</script>"));

        assert!(html.contains("<p><strong>Organización:</strong> &lt;b&gt;X&lt;/b&gt; &amp; Co</p>"));
        assert!(html.contains("<p>&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;</p>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn text_is_not_escaped() {
        let email = email(&config(), &message("A & B", "1 < 2"));

        assert_eq!(email.subject, "Nuevo contacto de A & B");
        assert!(email.text.contains("Organización: A & B\n"));
        assert!(email.text.ends_with("Mensaje:\n1 < 2"));
    }
}
