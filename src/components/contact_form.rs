//! Contact form: validation, relay submission and the mail-client fallback.
//!
//! Submission is best effort. When the relay cannot be reached (or answers
//! with an error) the visitor's mail client is opened with a pre-filled
//! message instead, and the page reports success either way.

use std::sync::LazyLock;

use regex::Regex;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
	Element, FormData, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement,
	Request, RequestInit, Response,
};

use crate::config::ContactConfig;
use crate::dom::{self, Listener};

/// Id of the contact `<form>`.
pub const FORM_ID: &str = "formularioContato";
/// Id of the status line under the form.
pub const STATUS_ID: &str = "mensagemStatus";
const LOADING_CLASS: &str = "carregando";
const STATUS_VISIBLE_MS: u32 = 5000;
const CRLF: &str = "%0D%0A";

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Why the form was not submitted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
	/// A required field is blank after trimming.
	#[error("field `{0}` is empty")]
	MissingField(&'static str),
	/// The email field does not look like `user@host.tld`.
	#[error("email address is malformed")]
	InvalidEmail,
}

/// Raw values as typed into the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
	/// Sender name.
	pub nome: String,
	/// Sender email address.
	pub email: String,
	/// Subject line.
	pub assunto: String,
	/// Message body.
	pub mensagem: String,
}

/// A validated, trimmed message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactMessage {
	/// Sender name.
	pub nome: String,
	/// Sender email address.
	pub email: String,
	/// Subject line.
	pub assunto: String,
	/// Message body.
	pub mensagem: String,
}

impl ContactForm {
	/// Trim every field and check that none is blank and the email is well formed.
	pub fn validate(&self) -> Result<ContactMessage, FormError> {
		let field = |name: &'static str, value: &str| {
			let value = value.trim();
			if value.is_empty() {
				Err(FormError::MissingField(name))
			} else {
				Ok(value.to_owned())
			}
		};
		let message = ContactMessage {
			nome: field("nome", &self.nome)?,
			email: field("email", &self.email)?,
			assunto: field("assunto", &self.assunto)?,
			mensagem: field("mensagem", &self.mensagem)?,
		};
		if !EMAIL.is_match(&message.email) {
			return Err(FormError::InvalidEmail);
		}
		Ok(message)
	}
}

impl ContactMessage {
	/// Multipart fields posted to the relay.
	pub fn relay_fields<'a>(&'a self, contact: &'a ContactConfig) -> [(&'static str, &'a str); 7] {
		[
			("nome", self.nome.as_str()),
			("email", self.email.as_str()),
			("assunto", self.assunto.as_str()),
			("mensagem", self.mensagem.as_str()),
			("_subject", contact.relay_subject.as_str()),
			("_captcha", "false"),
			("_template", "table"),
		]
	}

	/// `mailto:` link with the message pre-filled. `encode` percent-encodes a component.
	pub fn mailto_href(&self, contact: &ContactConfig, encode: impl Fn(&str) -> String) -> String {
		let body = [
			("Nome", &self.nome),
			("Email", &self.email),
			("Assunto", &self.assunto),
			("Mensagem", &self.mensagem),
		]
		.iter()
		.map(|(label, value)| encode(&format!("{label}: {value}")))
		.collect::<Vec<_>>()
		.join(CRLF);
		format!(
			"mailto:{}?subject={}&body={}",
			contact.recipient,
			encode(&contact.mailto_subject),
			body
		)
	}
}

/// What the status line says after a submit attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormStatus {
	/// Message delivered, either by the relay or handed to the mail client.
	Sent,
	/// Validation failed, nothing was sent.
	Invalid,
}

/// What the page does once the relay has answered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitOutcome {
	/// Status line to show.
	pub status: FormStatus,
	/// Navigate to the `mailto:` fallback.
	pub open_mail_client: bool,
	/// Clear the fields and drop the loading state on the button.
	pub reset_form: bool,
}

/// Decide the follow-up to a relay attempt. A failed relay falls back to the
/// mail client, and the visitor sees success either way.
pub fn relay_outcome<E>(relayed: &Result<(), E>) -> SubmitOutcome {
	SubmitOutcome {
		status: FormStatus::Sent,
		open_mail_client: relayed.is_err(),
		reset_form: true,
	}
}

impl FormStatus {
	/// Text shown in the status line.
	pub fn message(self) -> &'static str {
		match self {
			FormStatus::Sent => "Mensagem enviada com sucesso! Entrarei em contato em breve.",
			FormStatus::Invalid => "Por favor, preencha todos os campos corretamente.",
		}
	}

	/// Full `class` attribute of the status line.
	pub fn class_name(self) -> &'static str {
		match self {
			FormStatus::Sent => "mensagem-status sucesso",
			FormStatus::Invalid => "mensagem-status erro",
		}
	}
}

fn show_status(status: FormStatus) {
	let Some(el) = dom::by_id::<HtmlElement>(STATUS_ID) else {
		return;
	};
	el.set_text_content(Some(status.message()));
	el.set_class_name(status.class_name());
	dom::set_style(&el, "display", "block");
	dom::set_timeout(STATUS_VISIBLE_MS, move || {
		dom::set_style(&el, "display", "none");
	});
}

fn field_value(form: &HtmlFormElement, id: &str) -> String {
	let Some(el) = form.query_selector(&format!("#{id}")).ok().flatten() else {
		return String::new();
	};
	if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
		input.value()
	} else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
		area.value()
	} else {
		String::new()
	}
}

fn read_form(form: &HtmlFormElement) -> ContactForm {
	ContactForm {
		nome: field_value(form, "nome"),
		email: field_value(form, "email"),
		assunto: field_value(form, "assunto"),
		mensagem: field_value(form, "mensagem"),
	}
}

/// POST the message to the relay. Any transport error or non-2xx answer is an `Err`.
pub async fn post_contact(message: &ContactMessage, contact: &ContactConfig) -> Result<(), JsValue> {
	let window = dom::window().ok_or_else(|| JsValue::from_str("no window"))?;
	let form = FormData::new()?;
	for (name, value) in message.relay_fields(contact) {
		form.append_with_str(name, value)?;
	}

	let init = RequestInit::new();
	init.set_method("POST");
	init.set_body(&form);
	let request = Request::new_with_str_and_init(&contact.post_url(), &init)?;
	request.headers().set("Accept", "application/json")?;

	let response: Response = JsFuture::from(window.fetch_with_request(&request))
		.await?
		.dyn_into()?;
	if response.ok() {
		Ok(())
	} else {
		Err(JsValue::from_str(&format!("relay answered {}", response.status())))
	}
}

fn open_mail_client(message: &ContactMessage, contact: &ContactConfig) {
	let href = message.mailto_href(contact, |s| String::from(js_sys::encode_uri_component(s)));
	if let Some(window) = dom::window() {
		if let Err(e) = window.location().set_href(&href) {
			log::warn!("folio-fx: cannot open mail client: {:?}", e);
		}
	}
}

async fn submit(form: HtmlFormElement, button: Option<Element>, message: ContactMessage, contact: ContactConfig) {
	let relayed = post_contact(&message, &contact).await;
	match &relayed {
		Ok(()) => log::info!("folio-fx: contact message relayed"),
		Err(e) => log::warn!("folio-fx: relay failed ({:?}), falling back to mailto", e),
	}
	let outcome = relay_outcome(&relayed);
	if outcome.open_mail_client {
		open_mail_client(&message, &contact);
	}
	show_status(outcome.status);
	if outcome.reset_form {
		form.reset();
		if let Some(button) = button {
			let _ = button.class_list().remove_1(LOADING_CLASS);
		}
	}
}

/// Hook the contact form's submit event. `None` when the page has no form.
pub fn install(contact: ContactConfig) -> Option<Listener> {
	let form = dom::by_id::<HtmlFormElement>(FORM_ID)?;
	let form_submit = form.clone();
	Listener::new(form.as_ref(), "submit", move |ev| {
		ev.prevent_default();
		let message = match read_form(&form_submit).validate() {
			Ok(message) => message,
			Err(e) => {
				log::debug!("folio-fx: contact form rejected: {}", e);
				show_status(FormStatus::Invalid);
				return;
			}
		};

		let button = form_submit.query_selector(".btn").ok().flatten();
		if let Some(ref button) = button {
			let _ = button.class_list().add_1(LOADING_CLASS);
		}
		if let Some(status) = dom::by_id::<HtmlElement>(STATUS_ID) {
			dom::set_style(&status, "display", "none");
		}
		wasm_bindgen_futures::spawn_local(submit(form_submit.clone(), button, message, contact.clone()));
	})
}
