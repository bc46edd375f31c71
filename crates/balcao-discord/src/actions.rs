// SPDX-FileCopyrightText: 2026 Balcao Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Closed enumerations for slash commands and button custom ids.
//!
//! Dispatch matches these exhaustively, so adding an action is a
//! compile-time-checked change rather than a stringly-typed one. The wire
//! identifiers are the Portuguese ones the production guild already uses.

use strum::{AsRefStr, Display, EnumIter, EnumString};

use balcao_tickets::TicketKind;

/// Slash commands the bot answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum SlashCommand {
    Suporte,
    Setup,
    Cleanup,
    Status,
    Ping,
    Dashboard,
}

/// Button custom ids, exactly as registered on message components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ButtonAction {
    TicketCompraRealizada,
    TicketSemCompra,
    PagarTaxa,
    SolicitarReembolso,
    CopiarPix,
    CopiarPixCodigo,
    VerificarPagamento,
    PagarTaxaFinal,
    SolicitarReembolsoFinal,
    VerificarPagamentoFinal,
    ProblemaCompra,
    DuvidaGeral,
}

impl ButtonAction {
    /// The ticket kind a ticket-opening button creates, if it is one.
    pub fn ticket_kind(self) -> Option<TicketKind> {
        match self {
            ButtonAction::TicketCompraRealizada => Some(TicketKind::PurchaseMade),
            ButtonAction::TicketSemCompra => Some(TicketKind::NoPurchase),
            _ => None,
        }
    }

    /// Canned acknowledgement for the stub actions.
    ///
    /// These are placeholders in production too: the PIX generation and
    /// payment verification they will eventually trigger is owned by
    /// another team.
    pub fn acknowledgement(self) -> Option<&'static str> {
        match self {
            ButtonAction::TicketCompraRealizada | ButtonAction::TicketSemCompra => None,
            ButtonAction::PagarTaxa => Some("Processando pagamento da taxa..."),
            ButtonAction::SolicitarReembolso => Some("Solicitação de reembolso processada..."),
            ButtonAction::CopiarPix => Some("Chave PIX copiada!"),
            ButtonAction::CopiarPixCodigo => Some("Código PIX copiado!"),
            ButtonAction::VerificarPagamento => Some("Verificando pagamento..."),
            ButtonAction::PagarTaxaFinal => Some("Processando pagamento final..."),
            ButtonAction::SolicitarReembolsoFinal => Some("Reembolso final processado..."),
            ButtonAction::VerificarPagamentoFinal => Some("Verificação final concluída..."),
            ButtonAction::ProblemaCompra => Some("Analisando problema na compra..."),
            ButtonAction::DuvidaGeral => Some("Processando dúvida geral..."),
        }
    }
}
