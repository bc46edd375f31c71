// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embed and button builders for every message the bot posts.
//!
//! Texts are the PT-BR ones the production guild runs with. Building them
//! here keeps the handler free of formatting noise.

use balcao_core::PaymentMatch;
use chrono::DateTime;
use serenity::all::{
    ButtonStyle, Colour, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter, Timestamp,
};

use crate::actions::ButtonAction;

const GREEN: Colour = Colour(0x00ff00);
const RED: Colour = Colour(0xff0000);
const AMBER: Colour = Colour(0xffaa00);
const BLUE: Colour = Colour(0x0099ff);

const FOOTER: &str = "Recarga Bux Brasil";

/// Time-of-day salutation: morning 5-11, afternoon 12-17, night otherwise.
pub fn salutation(hour: u32) -> &'static str {
    if (5..12).contains(&hour) {
        "Olá bom dia!"
    } else if (12..18).contains(&hour) {
        "Olá boa tarde!"
    } else {
        "Olá boa noite!"
    }
}

/// Format an amount in BRL the way the store backends report it.
pub fn format_brl(amount: f64) -> String {
    format!("R$ {amount:.2}")
}

/// Render a backend timestamp for display; unparseable input passes through.
pub fn format_order_date(created_at: &str) -> String {
    DateTime::parse_from_rfc3339(created_at)
        .map(|dt| dt.format("%d/%m/%Y, %H:%M:%S").to_string())
        .unwrap_or_else(|_| created_at.to_string())
}

/// The /suporte panel: pick a ticket kind.
pub fn support_panel() -> (CreateEmbed, CreateActionRow) {
    let embed = CreateEmbed::new()
        .title("🎫 **Sistema de Suporte**")
        .description("Clique em uma das opções abaixo para abrir um ticket:")
        .colour(BLUE)
        .timestamp(Timestamp::now());
    (embed, ticket_buttons())
}

/// The /setup banner posted to the configured support channel.
pub fn setup_banner() -> (CreateEmbed, CreateActionRow) {
    let embed = CreateEmbed::new()
        .title("🎫 **Sistema de Suporte - Recarga Bux**")
        .description("Bem-vindo ao nosso sistema de suporte! Clique em uma das opções abaixo:")
        .field(
            "✅ **Compra Realizada**",
            "Se você já realizou uma compra e precisa de ajuda",
            false,
        )
        .field(
            "❓ **Sem Compra**",
            "Se você tem dúvidas ou problemas antes de comprar",
            false,
        )
        .colour(BLUE)
        .timestamp(Timestamp::now())
        .footer(CreateEmbedFooter::new(FOOTER));
    (embed, ticket_buttons())
}

fn ticket_buttons() -> CreateActionRow {
    CreateActionRow::Buttons(vec![
        CreateButton::new(ButtonAction::TicketCompraRealizada.as_ref())
            .label("✅ Compra Realizada")
            .style(ButtonStyle::Success),
        CreateButton::new(ButtonAction::TicketSemCompra.as_ref())
            .label("❓ Sem Compra")
            .style(ButtonStyle::Primary),
    ])
}

/// Greeting embeds posted into a fresh purchase ticket: salutation plus the
/// email prompt.
pub fn purchase_greeting(hour: u32) -> Vec<CreateEmbed> {
    let greeting = CreateEmbed::new()
        .title("🎫 **Ticket de Suporte - Compra Realizada**")
        .description(format!(
            "{} Sou a **assistente virtual da Recarga Bux** e irei lhe auxiliar com seu **pedido** hoje.",
            salutation(hour)
        ))
        .colour(GREEN)
        .timestamp(Timestamp::now())
        .footer(CreateEmbedFooter::new(FOOTER));

    let email_prompt = CreateEmbed::new()
        .title("📧 **Informações Necessárias**")
        .description(
            "Para que eu identifique seu pedido em nosso sistema, \
             **informe por gentileza o e-mail utilizado na compra**",
        )
        .field(
            "⚠️ **Importante**",
            "**Informe apenas o email**, por exemplo: **exemplo@gmail.com** \
             **sem nenhuma outra mensagem junto ao e-mail!!**",
            false,
        )
        .colour(AMBER)
        .timestamp(Timestamp::now());

    vec![greeting, email_prompt]
}

/// Greeting embed for a question ticket.
pub fn question_greeting(hour: u32) -> CreateEmbed {
    CreateEmbed::new()
        .title("🎫 **Ticket de Suporte - Sem Compra**")
        .description(format!(
            "{} Está com algum problema no momento de realizar a compra ou ficou com alguma dúvida?",
            salutation(hour)
        ))
        .colour(GREEN)
        .timestamp(Timestamp::now())
        .footer(CreateEmbedFooter::new(FOOTER))
}

/// Delayed menu for question tickets.
pub fn question_menu() -> (CreateEmbed, CreateActionRow) {
    let embed = CreateEmbed::new()
        .title("🤔 **Como posso ajudar?**")
        .description("Selecione uma das opções abaixo:")
        .colour(BLUE)
        .timestamp(Timestamp::now());

    let row = CreateActionRow::Buttons(vec![
        CreateButton::new(ButtonAction::ProblemaCompra.as_ref())
            .label("🛒 Problema na Compra")
            .style(ButtonStyle::Primary),
        CreateButton::new(ButtonAction::DuvidaGeral.as_ref())
            .label("❓ Dúvida Geral")
            .style(ButtonStyle::Secondary),
    ]);

    (embed, row)
}

/// Reply for a message that should have been an email but was not.
pub fn invalid_email() -> CreateEmbed {
    CreateEmbed::new()
        .title("❌ **E-mail Inválido**")
        .description("Por favor, informe um e-mail válido no formato: **exemplo@gmail.com**")
        .colour(RED)
        .timestamp(Timestamp::now())
}

/// Order summary once the consolidating search finds a paid order.
pub fn order_found(found: &PaymentMatch) -> CreateEmbed {
    CreateEmbed::new()
        .title("✅ **Pedido Encontrado**")
        .description("Encontrei seu pedido em nosso sistema!")
        .field("🆔 **ID do Pedido**", found.order.display_id(), true)
        .field("💰 **Valor**", format_brl(found.order.amount), true)
        .field("📅 **Data**", format_order_date(&found.order.created_at), true)
        .field("🏪 **Loja**", found.store_name.clone(), true)
        .field("📧 **E-mail**", found.order.customer_email.clone(), true)
        .field("📱 **Status**", found.order.status.clone(), true)
        .colour(GREEN)
        .timestamp(Timestamp::now())
}

/// The delayed fee prompt with its two action buttons.
pub fn fee_prompt() -> (CreateEmbed, CreateActionRow) {
    let embed = CreateEmbed::new()
        .title("💳 **Taxa de Liberação Necessária**")
        .description(
            "Para liberar seus Robux, é necessário pagar uma taxa de liberação de **R$ 5,00**.",
        )
        .field(
            "🎁 **Brinde Especial**",
            "Ao pagar a taxa, você ganhará **+500 Robux extras** como brinde!",
            false,
        )
        .field("⏰ **Prazo**", "Esta taxa deve ser paga em até 24 horas.", false)
        .colour(AMBER)
        .timestamp(Timestamp::now());

    let row = CreateActionRow::Buttons(vec![
        CreateButton::new(ButtonAction::PagarTaxa.as_ref())
            .label("💳 PAGAR TAXA")
            .style(ButtonStyle::Success),
        CreateButton::new(ButtonAction::SolicitarReembolso.as_ref())
            .label("💸 SOLICITAR REEMBOLSO")
            .style(ButtonStyle::Danger),
    ]);

    (embed, row)
}

/// No paid order anywhere: troubleshooting text.
pub fn order_not_found() -> CreateEmbed {
    CreateEmbed::new()
        .title("❌ **Pedido Não Encontrado**")
        .description("Não encontrei nenhum pedido com este e-mail em nosso sistema.")
        .field(
            "🔍 **Verifique**",
            "Certifique-se de que o e-mail está correto e que a compra foi realizada.",
            false,
        )
        .field(
            "📞 **Suporte**",
            "Se o problema persistir, entre em contato com nosso suporte.",
            false,
        )
        .colour(RED)
        .timestamp(Timestamp::now())
}

/// Bot status embed for /status.
pub fn bot_status(uptime_secs: u64, open_tickets: usize) -> CreateEmbed {
    let hours = uptime_secs / 3600;
    let minutes = (uptime_secs % 3600) / 60;
    let seconds = uptime_secs % 60;

    CreateEmbed::new()
        .title("📊 **Status do Bot**")
        .field("🟢 **Status**", "Online", true)
        .field("⏱️ **Uptime**", format!("{hours}h {minutes}m {seconds}s"), true)
        .field("🎫 **Tickets Ativos**", open_tickets.to_string(), true)
        .colour(GREEN)
        .timestamp(Timestamp::now())
}

/// Dashboard link embed for /dashboard.
pub fn dashboard_link(url: &str) -> CreateEmbed {
    CreateEmbed::new()
        .title("📊 **Dashboard Administrativo**")
        .description(format!("Acesse o dashboard em: {url}"))
        .colour(BLUE)
        .timestamp(Timestamp::now())
}
