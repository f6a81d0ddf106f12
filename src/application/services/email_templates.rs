//! HTML bodies for the transactional emails

use crate::domain::entities::WaitlistRole;

const SITE_URL: &str = "https://scrollio.co";
const UNKNOWN_ROLE_LABEL: &str = "Değerli Kullanıcı";

pub fn mentor_ready_subject(child_name: Option<&str>) -> String {
    format!("{} Scrollio Mentoru Hazır! 🎨", possessive_owner(child_name))
}

pub fn welcome_subject() -> String {
    "Aramıza Hoş Geldiniz! 🎉 | Scrollio Waitlist".to_string()
}

pub fn role_label(role: Option<WaitlistRole>) -> &'static str {
    role.map(|r| r.display_label()).unwrap_or(UNKNOWN_ROLE_LABEL)
}

fn possessive_owner(child_name: Option<&str>) -> String {
    match child_name {
        Some(name) => format!("{}'in", name),
        None => "Çocuğunuzun".to_string(),
    }
}

pub fn render_mentor_ready(
    child_name: Option<&str>,
    mentor_image_url: &str,
    original_drawing: Option<&str>,
) -> String {
    let owner = escape_html(&possessive_owner(child_name));
    let drawing_block = original_drawing
        .map(|src| {
            format!(
                r#"<div style="text-align: center; margin-bottom: 25px;">
                <p style="color: #ffffff; font-size: 14px; margin: 0 0 10px 0;">🎨 Orijinal Çizim</p>
                <img src="{}" alt="Original Drawing" style="max-width: 200px; border-radius: 10px; border: 1px solid rgba(255,255,255,0.1);">
              </div>"#,
                escape_html(src)
            )
        })
        .unwrap_or_default();

    let body = format!(
        r#"<div style="text-align: center; margin-bottom: 30px;">
              <h1 style="color: #ffffff; font-size: 28px; margin: 0;">Scrollio Kids</h1>
            </div>
            <div style="background: linear-gradient(135deg, rgba(168, 85, 247, 0.1), rgba(236, 72, 153, 0.1)); border: 1px solid rgba(255,255,255,0.1); border-radius: 20px; padding: 30px; margin-bottom: 30px;">
              <h2 style="color: #ffffff; font-size: 24px; margin: 0 0 20px 0; text-align: center;">🎉 {owner} Mentoru Hazır!</h2>
              <p style="color: #9090a0; font-size: 16px; line-height: 1.6; margin: 0 0 25px 0; text-align: center;">
                Çocuğunuzun hayal gücünden doğan özel mentor karakteri AI tarafından hayata geçirildi!
              </p>
              <div style="text-align: center; margin-bottom: 25px;">
                <p style="color: #ffffff; font-size: 14px; margin: 0 0 10px 0;">✨ AI Mentor Karakteri</p>
                <img src="{image}" alt="Mentor Character" style="max-width: 100%; border-radius: 15px; border: 2px solid rgba(168, 85, 247, 0.3);">
              </div>
              {drawing_block}
            </div>
            {cta}
            <div style="text-align: center; border-top: 1px solid rgba(255,255,255,0.1); padding-top: 20px;">
              <p style="color: #6b7280; font-size: 12px; margin: 0;">
                Bu email, Scrollio Kids demo deneyiminiz sonucunda gönderilmiştir.<br>
                © 2024 Scrollio. Tüm hakları saklıdır.
              </p>
            </div>"#,
        owner = owner,
        image = escape_html(mentor_image_url),
        drawing_block = drawing_block,
        cta = call_to_action("Scrollio ile çocuğunuzun öğrenme yolculuğunu keşfedin"),
    );

    wrap_document(&body)
}

pub fn render_welcome(name: &str, role: Option<WaitlistRole>) -> String {
    let body = format!(
        r#"<div style="text-align: center; margin-bottom: 30px;">
              <h1 style="color: #ffffff; font-size: 28px; margin: 0;">Scrollio</h1>
            </div>
            <div style="background: linear-gradient(135deg, rgba(249, 115, 22, 0.1), rgba(168, 85, 247, 0.1)); border: 1px solid rgba(255,255,255,0.1); border-radius: 20px; padding: 30px; margin-bottom: 30px;">
              <h2 style="color: #ffffff; font-size: 24px; margin: 0 0 20px 0; text-align: center;">🎉 Aramıza Hoş Geldiniz, {name}!</h2>
              <p style="color: #9090a0; font-size: 16px; line-height: 1.6; margin: 0 0 20px 0;">
                Scrollio waitlist'ine kaydınızı aldık! Merak ve öğrenme tutkunuzu paylaştığınız için teşekkür ederiz.
              </p>
              <p style="color: #9090a0; font-size: 16px; line-height: 1.6; margin: 0 0 25px 0;">
                <strong style="color: #ffffff;">{role}</strong> olarak, Scrollio'nun size özel öğrenme deneyimini ilk keşfedenlerden biri olacaksınız.
              </p>
              <div style="background: rgba(255,255,255,0.03); border-radius: 15px; padding: 20px; margin-bottom: 25px;">
                <h3 style="color: #ffffff; font-size: 18px; margin: 0 0 15px 0;">📬 Sırada Ne Var?</h3>
                <ul style="color: #9090a0; font-size: 14px; line-height: 1.8; margin: 0; padding-left: 20px;">
                  <li style="margin-bottom: 10px;">Beta sürümü hazır olduğunda size haber vereceğiz</li>
                  <li style="margin-bottom: 10px;">Özel güncellemeler ve içerikler paylaşacağız</li>
                  <li style="margin-bottom: 10px;">Ürünü şekillendirmemize yardımcı olabilirsiniz</li>
                  <li>Erken erişim avantajlarından yararlanacaksınız</li>
                </ul>
              </div>
            </div>
            {cta}
            <div style="text-align: center; border-top: 1px solid rgba(255,255,255,0.1); padding-top: 20px;">
              <p style="color: #6b7280; font-size: 12px; margin: 0 0 10px 0;">
                Bize ulaşmak isterseniz: <a href="mailto:info@scrollio.co" style="color: #f97316; text-decoration: none;">info@scrollio.co</a>
              </p>
              <p style="color: #6b7280; font-size: 12px; margin: 0;">© 2024 Scrollio. Tüm hakları saklıdır.</p>
            </div>"#,
        name = escape_html(name),
        role = role_label(role),
        cta = call_to_action("Scrollio hakkında daha fazla bilgi edinin"),
    );

    wrap_document(&body)
}

fn call_to_action(lead: &str) -> String {
    format!(
        r#"<div style="text-align: center; margin-bottom: 30px;">
              <p style="color: #9090a0; font-size: 14px; margin: 0 0 15px 0;">{}</p>
              <a href="{}" style="display: inline-block; background: linear-gradient(135deg, #a855f7, #ec4899); color: white; text-decoration: none; padding: 15px 35px; border-radius: 30px; font-weight: 600; font-size: 16px;">Scrollio'yu Keşfet</a>
            </div>"#,
        lead, SITE_URL
    )
}

fn wrap_document(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
</head>
<body style="margin: 0; padding: 0; background-color: #0a0a0f; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;">
  <div style="max-width: 600px; margin: 0 auto; padding: 40px 20px;">
            {}
  </div>
</body>
</html>"#,
        body
    )
}

/// Escape text for use inside HTML element content and quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
