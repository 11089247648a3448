use crate::flow_control::api::BookingApi;
use crate::flow_control::availability_flow::{
    AvailabilityCommand, AvailabilityEvent, AvailabilityFlow, AvailabilityState, SlotSelection,
};
use crate::flow_control::booking_flow::{BookingCommand, BookingEvent, BookingFlow, BookingState};
use crate::flow_control::cancellation::CancellationReason;
use crate::flow_control::form::CustomerForm;
use crate::flow_control::manage_flow::{
    ActionStatus, ManageCommand, ManageEvent, ManageFlow, ManageState,
};
use crate::{error, info, log, warn};
use base64::Engine;
use chrono::{NaiveDate, NaiveTime, Utc};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

type InputLines = Lines<BufReader<Stdin>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Book,
    Manage,
}

/// Interactive console shell: a tab switch between the booking and the
/// management flow. All business logic lives in the flow state machines;
/// the shell renders their state, executes the commands they emit and feeds
/// the completion events back in.
pub struct Shell {
    api: Arc<dyn BookingApi>,
    restaurant: String,
    availability: AvailabilityFlow,
    manage: ManageFlow,
    visit_date: NaiveDate,
    party_size: u32,
}

impl Shell {
    pub fn new(api: Arc<dyn BookingApi>, restaurant: String) -> Self {
        Self {
            api,
            restaurant,
            availability: AvailabilityFlow::new(),
            manage: ManageFlow::new(),
            visit_date: Utc::now().date_naive(),
            party_size: 2,
        }
    }

    pub async fn run(mut self) {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut tab = Tab::Book;
        info!("Restaurant booking client for {}", self.restaurant);
        info!("Type 'help' for the available commands");
        loop {
            let prompt = match tab {
                Tab::Book => "book> ",
                Tab::Manage => "manage> ",
            };
            let Some(input) = read_line(&mut lines, prompt).await else { break };
            let command = input.trim();
            if command.is_empty() {
                continue;
            }
            match command {
                "quit" | "exit" => break,
                "book" => {
                    tab = Tab::Book;
                    continue;
                }
                "manage" => {
                    tab = Tab::Manage;
                    continue;
                }
                "help" => {
                    self.print_help(tab);
                    continue;
                }
                _ => {}
            }
            match tab {
                Tab::Book => self.handle_book_command(&mut lines, command).await,
                Tab::Manage => self.handle_manage_command(command).await,
            }
        }
        info!("Bye");
    }

    fn print_help(&self, tab: Tab) {
        match tab {
            Tab::Book => {
                println!("  date <YYYY-MM-DD>   set the visit date (current: {})", self.visit_date);
                println!("  party <1-8>         set the party size (current: {})", self.party_size);
                println!("  search              check availability");
                println!("  select <HH:MM[:SS]> book an available slot");
                println!("  manage              switch to booking management");
                println!("  quit                leave");
            }
            Tab::Manage => {
                println!("  lookup <reference>  fetch a booking by its reference");
                println!("  party <1-8>         edit the party size");
                println!("  requests <text>     edit the special requests");
                println!("  reason <1-5>        pick a cancellation reason");
                println!("  save                send the changed fields");
                println!("  cancel              cancel the booking");
                println!("  book                switch to table search");
                println!("  quit                leave");
            }
        }
    }

    // ---- book tab -------------------------------------------------------

    async fn handle_book_command(&mut self, lines: &mut InputLines, line: &str) {
        let (verb, rest) = split_command(line);
        match verb {
            "date" => match rest.parse::<NaiveDate>() {
                Ok(date) => self.visit_date = date,
                Err(_) => warn!("Expected a date like 2025-03-01"),
            },
            "party" => match rest.parse::<u32>() {
                Ok(size) => self.party_size = size.clamp(1, 8),
                Err(_) => warn!("Expected a party size between 1 and 8"),
            },
            "search" => {
                let requested = AvailabilityEvent::SearchRequested {
                    visit_date: self.visit_date,
                    party_size: self.party_size,
                };
                if let Some(command) = self.availability.dispatch(requested) {
                    self.execute_search(command).await;
                }
                self.render_availability();
            }
            "select" => {
                let Some(time) = parse_time(rest) else {
                    warn!("Expected a slot time like 18:00:00");
                    return;
                };
                match self.availability.select_slot(time) {
                    Some(selection) => self.run_booking(lines, selection).await,
                    None => warn!("No available slot at {time}"),
                }
            }
            _ => warn!("Unknown command {verb:?}, try 'help'"),
        }
    }

    async fn execute_search(&mut self, command: AvailabilityCommand) {
        let AvailabilityCommand::Search { seq, visit_date, party_size } = command;
        log!("Searching availability on {visit_date} for a party of {party_size}");
        let event = match self.api.search_availability(visit_date, party_size).await {
            Ok(result) => AvailabilityEvent::SearchSucceeded { seq, result },
            Err(error) => AvailabilityEvent::SearchFailed { seq, error },
        };
        self.availability.dispatch(event);
    }

    fn render_availability(&self) {
        match self.availability.state() {
            AvailabilityState::Idle => println!("No search yet."),
            AvailabilityState::Searching { visit_date, party_size, .. } => {
                println!("Searching {visit_date} for a party of {party_size}...");
            }
            AvailabilityState::Results(results) => {
                println!(
                    "{}: {} for {} people ({} slots)",
                    results.restaurant, results.visit_date, results.party_size, results.total_slots
                );
                for slot in &results.available_slots {
                    if slot.available {
                        println!(
                            "  {}  open  (max party {}, booked {})",
                            slot.time, slot.max_party_size, slot.current_bookings
                        );
                    } else {
                        println!("  {}  unavailable", slot.time);
                    }
                }
            }
            AvailabilityState::SearchFailed(err) => error!("Search failed: {err}"),
        }
    }

    // ---- booking creation -----------------------------------------------

    async fn run_booking(&mut self, lines: &mut InputLines, slot: SlotSelection) {
        let mut flow = BookingFlow::new(slot);
        info!(
            "Booking {} at {} for a party of {}",
            slot.visit_date, slot.visit_time, slot.party_size
        );
        log!("Enter your details; an empty answer keeps the shown value, 'back' returns");
        loop {
            let editing = match flow.state() {
                BookingState::Editing { form, field_errors, submit_error } => {
                    if let Some(message) = submit_error {
                        error!("{message}");
                    }
                    for field_error in field_errors {
                        warn!("{field_error}");
                    }
                    Some(form.clone())
                }
                BookingState::Submitting { .. } => None,
                BookingState::Confirmed { booking } => {
                    let reference = booking.booking_reference.clone();
                    self.confirmation_screen(lines, &reference, slot).await;
                    return;
                }
            };
            let Some(current) = editing else {
                // A submission always resolves within the same iteration.
                continue;
            };
            let Some(form) = self.prompt_form(lines, current).await else {
                if flow.can_go_back() {
                    return;
                }
                continue;
            };
            if let Some(BookingCommand::CreateBooking {
                seq,
                visit_date,
                visit_time,
                party_size,
                special_requests,
                customer,
            }) = flow.dispatch(BookingEvent::SubmitRequested(form))
            {
                log!("Submitting booking request");
                let event = match self
                    .api
                    .create_booking(visit_date, visit_time, party_size, special_requests, customer)
                    .await
                {
                    Ok(booking) => BookingEvent::CreateSucceeded { seq, booking },
                    Err(error) => BookingEvent::CreateFailed { seq, error },
                };
                flow.dispatch(event);
            }
        }
    }

    /// Prompts every form field, keeping the previously entered value on an
    /// empty answer. Returns `None` when the user backs out or stdin ends.
    async fn prompt_form(
        &self,
        lines: &mut InputLines,
        current: CustomerForm,
    ) -> Option<CustomerForm> {
        let mut form = current;
        for (label, value) in [
            ("First name", &mut form.first_name),
            ("Surname", &mut form.surname),
            ("Email", &mut form.email),
            ("Mobile", &mut form.mobile),
            ("Special requests (optional)", &mut form.special_requests),
        ] {
            let prompt = if value.is_empty() {
                format!("{label}: ")
            } else {
                format!("{label} [{value}]: ")
            };
            let input = read_line(lines, &prompt).await?;
            let answer = input.trim();
            if answer == "back" {
                return None;
            }
            if !answer.is_empty() {
                *value = String::from(answer);
            }
        }
        Some(form)
    }

    async fn confirmation_screen(
        &self,
        lines: &mut InputLines,
        reference: &str,
        slot: SlotSelection,
    ) {
        info!("Booking confirmed!");
        println!("Reference: {reference}");
        println!("Date: {} at {}, party of {}", slot.visit_date, slot.visit_time, slot.party_size);
        loop {
            let Some(answer) = read_line(lines, "[c]opy reference / [b]ack to search: ").await
            else {
                return;
            };
            match answer.trim() {
                "c" => {
                    copy_to_clipboard(reference);
                    println!("Copied {reference}");
                }
                "b" | "back" | "" => return,
                other => warn!("Unknown answer {other:?}"),
            }
        }
    }

    // ---- manage tab -----------------------------------------------------

    async fn handle_manage_command(&mut self, line: &str) {
        let (verb, rest) = split_command(line);
        let event = match verb {
            "lookup" => {
                if rest.trim().is_empty() {
                    warn!("A booking reference is required");
                    return;
                }
                Some(ManageEvent::LookupRequested { reference: String::from(rest) })
            }
            "party" => match rest.parse::<u32>() {
                Ok(size) => Some(ManageEvent::PartySizeEdited(size)),
                Err(_) => {
                    warn!("Expected a party size between 1 and 8");
                    None
                }
            },
            "requests" => Some(ManageEvent::SpecialRequestsEdited(String::from(rest))),
            "reason" => match rest.parse::<u8>().ok().and_then(CancellationReason::from_id) {
                Some(reason) => Some(ManageEvent::ReasonSelected(reason)),
                None => {
                    self.print_reasons();
                    None
                }
            },
            "save" => Some(ManageEvent::UpdateRequested),
            "cancel" => Some(ManageEvent::CancelRequested),
            _ => {
                warn!("Unknown command {verb:?}, try 'help'");
                None
            }
        };
        let Some(manage_event) = event else { return };
        let refused = matches!(
            manage_event,
            ManageEvent::UpdateRequested | ManageEvent::CancelRequested
        );
        if let Some(command) = self.manage.dispatch(manage_event) {
            self.execute_manage(command).await;
        } else if refused {
            log!("Nothing to send");
        }
        self.render_manage();
    }

    fn print_reasons(&self) {
        use strum::IntoEnumIterator;
        println!("Cancellation reasons:");
        for reason in CancellationReason::iter() {
            println!("  {}  {}", reason.id(), reason);
        }
    }

    async fn execute_manage(&mut self, command: ManageCommand) {
        let event = match command {
            ManageCommand::Lookup { seq, reference } => {
                log!("Looking up booking {reference}");
                match self.api.get_booking(&reference).await {
                    Ok(booking) => ManageEvent::LookupSucceeded { seq, booking },
                    Err(error) => ManageEvent::LookupFailed { seq, error },
                }
            }
            ManageCommand::Update { seq, reference, patch } => {
                log!("Updating booking {reference}");
                match self.api.update_booking(&reference, patch).await {
                    Ok(booking) => ManageEvent::UpdateSucceeded { seq, booking },
                    Err(error) => ManageEvent::UpdateFailed { seq, error },
                }
            }
            ManageCommand::Cancel { seq, reference, reason } => {
                log!("Cancelling booking {reference} ({reason})");
                match self.api.cancel_booking(&reference, reason).await {
                    Ok(response) => ManageEvent::CancelSucceeded { seq, response },
                    Err(error) => ManageEvent::CancelFailed { seq, error },
                }
            }
        };
        self.manage.dispatch(event);
    }

    fn render_manage(&self) {
        match self.manage.state() {
            ManageState::NoBooking => println!("No booking loaded. Use 'lookup <reference>'."),
            ManageState::LookingUp { .. } => println!("Looking up..."),
            ManageState::LookupFailed(message) => error!("{message}"),
            ManageState::Found(managed) => {
                let booking = &managed.booking;
                println!("Reference: {} (id {})", booking.booking_reference, booking.booking_id);
                println!("Status:    {}", booking.status);
                println!("At:        {}", booking.restaurant);
                println!("When:      {} at {}", booking.visit_date, booking.visit_time);
                println!("Party:     {}", booking.party_size);
                if let Some(customer) = &booking.customer {
                    println!(
                        "Customer:  {} {}, {}, {}",
                        customer.first_name.as_deref().unwrap_or(""),
                        customer.surname.as_deref().unwrap_or(""),
                        customer.email.as_deref().unwrap_or(""),
                        customer.mobile.as_deref().unwrap_or(""),
                    );
                }
                println!("Created:   {}", booking.created_at.format("%Y-%m-%d %H:%M"));
                if let Some(updated) = booking.updated_at {
                    println!("Updated:   {}", updated.format("%Y-%m-%d %H:%M"));
                }
                println!("Requests:  {}", booking.special_requests.as_deref().unwrap_or("none"));
                println!(
                    "Edits:     party {} / requests {:?} / reason {}",
                    managed.party_size, managed.special_requests, managed.reason
                );
                match &managed.update_status {
                    ActionStatus::Saved => println!("Update:    saved"),
                    ActionStatus::Failed(message) => error!("Update: {message}"),
                    _ => {}
                }
                match &managed.cancel_status {
                    ActionStatus::Saved => println!("Cancel:    cancelled"),
                    ActionStatus::Failed(message) => error!("Cancel: {message}"),
                    _ => {}
                }
            }
        }
    }
}

fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    }
}

fn parse_time(input: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(input, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M"))
        .ok()
}

async fn read_line(lines: &mut InputLines, prompt: &str) -> Option<String> {
    print!("{prompt}");
    let _ = std::io::stdout().flush();
    lines.next_line().await.ok().flatten()
}

/// Best-effort copy of the reference via an OSC 52 escape sequence; a
/// terminal that ignores it simply drops the write, which is fine here.
fn copy_to_clipboard(text: &str) {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text);
    let mut out = std::io::stdout();
    let _ = write!(out, "\x1b]52;c;{encoded}\x07");
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_split_on_first_whitespace() {
        assert_eq!(split_command("lookup ABC1234"), ("lookup", "ABC1234"));
        assert_eq!(split_command("requests by the window"), ("requests", "by the window"));
        assert_eq!(split_command("search"), ("search", ""));
    }

    #[test]
    fn slot_times_parse_with_and_without_seconds() {
        assert_eq!(parse_time("18:00:00"), NaiveTime::from_hms_opt(18, 0, 0));
        assert_eq!(parse_time("18:00"), NaiveTime::from_hms_opt(18, 0, 0));
        assert_eq!(parse_time("late"), None);
    }
}
