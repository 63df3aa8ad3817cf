use std::collections::HashSet;
use std::time::Duration;

use iced::alignment::Horizontal;
use iced::theme;
use iced::widget::{
    button, checkbox, column, container, pick_list, row, scrollable, text, text_input,
};
use iced::{Alignment, Application, Color, Command, Element, Length, Subscription, Theme};

use printsetup_core::{
    load_printers, now_epoch_seconds, render_test_page, save_printers, send_test_page, targets,
    Error, HttpScanClient, PrinterAddress, PrinterForm, PrinterRecord, RegisteredPrinter,
    ScanConfig, ScanOutcome, ScanToken, ScanWidget, TestPageConfig, DEFAULT_RAW_PRINT_PORT,
    SCAN_PLACEHOLDER_LABEL,
};

use crate::logging::{apply_log_level, LogEntry, LogLevel, LogStore, ReloadHandle};

const RECENT_LOG_LINES: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Setup,
    Debug,
}

#[derive(Debug, Clone)]
pub enum Message {
    LogTick,
    LogLevelChanged(LogLevel),
    ToggleTarget(String, bool),
    CopyDiagnostics,
    SelectTab(Tab),
    FormNameChanged(String),
    FormIpChanged(String),
    FormPortChanged(String),
    FormMainToggled(bool),
    BaseUrlChanged(String),
    ScanTimeoutChanged(String),
    StartScan,
    ScanFinished(ScanTaskResult),
    PrinterPicked(PrinterRecord),
    RegisterPrinter,
    SelectPrinter(usize),
    DeleteSelectedPrinter,
    PrintersPathChanged(String),
    LoadPrinters,
    SavePrinters,
    SendTestPage,
    TestPageFinished(Result<String, ErrorInfo>),
}

#[derive(Debug, Clone)]
pub struct ErrorInfo {
    summary: String,
    detail: String,
}

impl ErrorInfo {
    fn from_error(error: &Error) -> Self {
        Self {
            summary: error.user_summary(),
            detail: error.technical_detail(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScanTaskResult {
    token: ScanToken,
    outcome: Result<Vec<PrinterRecord>, ErrorInfo>,
}

pub struct Flags {
    pub log_store: LogStore,
    pub reload_handle: ReloadHandle,
}

pub struct PrintSetupApp {
    log_store: LogStore,
    reload_handle: ReloadHandle,
    log_entries: Vec<LogEntry>,
    log_level: LogLevel,
    known_targets: HashSet<String>,
    enabled_targets: HashSet<String>,
    copy_status: Option<String>,
    active_tab: Tab,
    form: PrinterForm,
    port_text: String,
    is_main: bool,
    base_url: String,
    scan_timeout_text: String,
    widget: ScanWidget,
    picked: Option<PrinterRecord>,
    scan_status: Option<String>,
    register_status: Option<String>,
    printers: Vec<RegisteredPrinter>,
    selected_printer: Option<usize>,
    printers_path: String,
    printers_status: Option<String>,
    test_page_in_flight: bool,
    test_page_status: Option<String>,
}

impl Application for PrintSetupApp {
    type Executor = iced::executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = Flags;

    fn new(flags: Flags) -> (Self, Command<Message>) {
        let default_targets = [
            targets::SCAN,
            targets::HTTP,
            targets::PRINTING,
            targets::UI,
            targets::STORAGE,
        ];
        let known_targets: HashSet<String> =
            default_targets.iter().map(|value| value.to_string()).collect();
        let enabled_targets = known_targets.clone();

        (
            Self {
                log_store: flags.log_store,
                reload_handle: flags.reload_handle,
                log_entries: Vec::new(),
                log_level: LogLevel::default(),
                known_targets,
                enabled_targets,
                copy_status: None,
                active_tab: Tab::Setup,
                form: PrinterForm::default(),
                port_text: DEFAULT_RAW_PRINT_PORT.to_string(),
                is_main: false,
                base_url: ScanConfig::default().base_url,
                scan_timeout_text: String::new(),
                widget: ScanWidget::new(),
                picked: None,
                scan_status: None,
                register_status: None,
                printers: Vec::new(),
                selected_printer: None,
                printers_path: "printers.ron".to_string(),
                printers_status: None,
                test_page_in_flight: false,
                test_page_status: None,
            },
            Command::none(),
        )
    }

    fn title(&self) -> String {
        "Printer Setup".to_string()
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::LogTick => {
                self.refresh_logs();
                Command::none()
            }
            Message::LogLevelChanged(level) => {
                self.log_level = level;
                apply_log_level(&self.reload_handle, level);
                tracing::info!(target: targets::UI, "Log level set to {}", level);
                Command::none()
            }
            Message::ToggleTarget(target, enabled) => {
                if enabled {
                    self.enabled_targets.insert(target);
                } else {
                    self.enabled_targets.remove(&target);
                }
                Command::none()
            }
            Message::CopyDiagnostics => {
                self.copy_status = Some(self.copy_diagnostics());
                Command::none()
            }
            Message::SelectTab(tab) => {
                self.active_tab = tab;
                Command::none()
            }
            Message::FormNameChanged(value) => {
                self.form.name = value;
                Command::none()
            }
            Message::FormIpChanged(value) => {
                self.form.ip_address = value;
                Command::none()
            }
            Message::FormPortChanged(value) => {
                self.port_text = value;
                Command::none()
            }
            Message::FormMainToggled(value) => {
                self.is_main = value;
                Command::none()
            }
            Message::BaseUrlChanged(value) => {
                self.base_url = value;
                Command::none()
            }
            Message::ScanTimeoutChanged(value) => {
                self.scan_timeout_text = value;
                Command::none()
            }
            Message::StartScan => self.start_scan(),
            Message::ScanFinished(result) => {
                self.handle_scan_result(result);
                Command::none()
            }
            Message::PrinterPicked(record) => {
                self.widget.apply_selection(&record, &mut self.form);
                self.picked = Some(record);
                Command::none()
            }
            Message::RegisterPrinter => {
                self.register_printer();
                Command::none()
            }
            Message::SelectPrinter(index) => {
                self.selected_printer = Some(index);
                Command::none()
            }
            Message::DeleteSelectedPrinter => {
                self.delete_selected_printer();
                Command::none()
            }
            Message::PrintersPathChanged(value) => {
                self.printers_path = value;
                Command::none()
            }
            Message::LoadPrinters => {
                self.load_printers_from_path();
                Command::none()
            }
            Message::SavePrinters => {
                self.save_printers_to_path();
                Command::none()
            }
            Message::SendTestPage => self.send_test_page_command(),
            Message::TestPageFinished(result) => {
                self.test_page_in_flight = false;
                match result {
                    Ok(address) => {
                        self.test_page_status = Some(format!("Test page sent to {address}."));
                    }
                    Err(error) => {
                        self.test_page_status =
                            Some(format!("Test page failed: {}", error.summary));
                        tracing::warn!(
                            target: targets::UI,
                            detail = %error.detail,
                            "Test page failed"
                        );
                    }
                }
                Command::none()
            }
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        iced::time::every(Duration::from_millis(250)).map(|_| Message::LogTick)
    }

    fn view(&self) -> Element<'_, Message> {
        let header = row![
            text("Printer Setup")
                .size(28)
                .style(theme::Text::Color(Color::from_rgb8(0x10, 0x1a, 0x24))),
            text("receipt printer registration")
                .size(16)
                .style(theme::Text::Color(Color::from_rgb8(0x5f, 0x6b, 0x7a))),
        ]
        .spacing(12)
        .align_items(Alignment::Center);

        let tabs = self.tab_bar();

        let body = match self.active_tab {
            Tab::Setup => self.setup_tab_view(),
            Tab::Debug => self.debug_tab_view(),
        };

        let content = column![header, tabs, body].spacing(20).padding(16);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

impl PrintSetupApp {
    fn refresh_logs(&mut self) {
        let entries = self.log_store.snapshot();
        for entry in &entries {
            if self.known_targets.insert(entry.target.clone()) {
                self.enabled_targets.insert(entry.target.clone());
            }
        }
        self.log_entries = entries;
    }

    fn tab_bar(&self) -> Element<'_, Message> {
        row![
            self.tab_button(Tab::Setup, "Setup"),
            self.tab_button(Tab::Debug, "Debug")
        ]
        .spacing(8)
        .align_items(Alignment::Center)
        .into()
    }

    fn tab_button(&self, tab: Tab, label: &str) -> Element<'_, Message> {
        let style = if self.active_tab == tab {
            theme::Button::Primary
        } else {
            theme::Button::Secondary
        };

        button(text(label))
            .style(style)
            .on_press(Message::SelectTab(tab))
            .into()
    }

    fn scan_config(&self) -> ScanConfig {
        let mut config = ScanConfig::new(self.base_url.trim());
        if let Ok(seconds) = self.scan_timeout_text.trim().parse::<u64>() {
            if seconds > 0 {
                config = config.with_timeout(Duration::from_secs(seconds));
            }
        }
        config
    }

    fn start_scan(&mut self) -> Command<Message> {
        let Some(token) = self.widget.begin_scan() else {
            return Command::none();
        };

        let config = self.scan_config();
        self.scan_status = Some(format!("Scanning via {}.", config.endpoint_url()));

        Command::perform(
            async move {
                let client = HttpScanClient::new(config);
                let outcome = client
                    .scan()
                    .await
                    .map_err(|error| ErrorInfo::from_error(&error));
                ScanTaskResult { token, outcome }
            },
            Message::ScanFinished,
        )
    }

    fn handle_scan_result(&mut self, result: ScanTaskResult) {
        let ScanTaskResult { token, outcome } = result;
        match self.widget.finish_scan(token, outcome) {
            ScanOutcome::Updated(count) => {
                self.picked = None;
                self.scan_status = Some(format!("Scan finished: {count} printers found."));
            }
            ScanOutcome::Failed(error) => {
                self.scan_status = Some(format!("Scan failed: {}", error.summary));
            }
            ScanOutcome::Stale => {}
        }
    }

    fn register_printer(&mut self) {
        let name = self.form.name.trim().to_string();
        let ip = self.form.ip_address.trim().to_string();
        let port_text = self.port_text.trim().to_string();

        if ip.is_empty() {
            self.register_status = Some("Add failed: IP address is empty.".to_string());
            return;
        }

        let port = if port_text.is_empty() {
            DEFAULT_RAW_PRINT_PORT
        } else {
            match port_text.parse::<u16>() {
                Ok(port) => port,
                Err(_) => {
                    self.register_status = Some("Add failed: invalid port.".to_string());
                    return;
                }
            }
        };

        let now = now_epoch_seconds();
        if let Some(existing) = self
            .printers
            .iter_mut()
            .find(|printer| printer.ip_address == ip)
        {
            if !name.is_empty() {
                existing.name = name;
            }
            existing.port = port;
            existing.is_main = self.is_main;
            existing.added_at = Some(now);
            self.register_status = Some(format!("Updated printer {ip}."));
            return;
        }

        let mut printer = RegisteredPrinter::new(name, ip.clone());
        printer.port = port;
        printer.is_main = self.is_main;
        printer.added_at = Some(now);
        self.printers.push(printer);

        tracing::info!(target: targets::UI, ip = %ip, "Printer registered");
        self.register_status = Some(format!("Added printer {ip}."));
    }

    fn delete_selected_printer(&mut self) {
        let Some(index) = self.selected_printer else {
            return;
        };

        if index >= self.printers.len() {
            self.selected_printer = None;
            return;
        }

        self.printers.remove(index);

        if self.printers.is_empty() {
            self.selected_printer = None;
        } else {
            self.selected_printer = Some(index.min(self.printers.len() - 1));
        }
    }

    fn load_printers_from_path(&mut self) {
        let path = self.printers_path.trim().to_string();
        if path.is_empty() {
            self.printers_status = Some("Load failed: path is empty.".to_string());
            return;
        }

        match load_printers(&path) {
            Ok(printers) => {
                let count = printers.len();
                self.printers = printers;
                self.selected_printer = None;
                self.printers_status = Some(format!("Loaded {count} printers from {path}."));
            }
            Err(error) => {
                tracing::warn!(
                    target: targets::UI,
                    detail = %error.technical_detail(),
                    "Printer list load failed"
                );
                self.printers_status = Some(format!("Load failed: {}", error.user_summary()));
            }
        }
    }

    fn save_printers_to_path(&mut self) {
        let path = self.printers_path.trim().to_string();
        if path.is_empty() {
            self.printers_status = Some("Save failed: path is empty.".to_string());
            return;
        }

        match save_printers(&path, &self.printers) {
            Ok(()) => {
                self.printers_status = Some(format!(
                    "Saved {} printers to {path}.",
                    self.printers.len()
                ));
            }
            Err(error) => {
                tracing::warn!(
                    target: targets::UI,
                    detail = %error.technical_detail(),
                    "Printer list save failed"
                );
                self.printers_status = Some(format!("Save failed: {}", error.user_summary()));
            }
        }
    }

    fn send_test_page_command(&mut self) -> Command<Message> {
        if self.test_page_in_flight {
            return Command::none();
        }

        let ip = self.form.ip_address.trim().to_string();
        if ip.is_empty() {
            self.test_page_status = Some("Test page failed: IP address is empty.".to_string());
            return Command::none();
        }

        let port = self
            .port_text
            .trim()
            .parse::<u16>()
            .unwrap_or(DEFAULT_RAW_PRINT_PORT);
        let address = PrinterAddress::new(ip, port);

        let name = self.form.name.trim();
        let page_title = if name.is_empty() {
            address.to_string()
        } else {
            name.to_string()
        };
        let payload = render_test_page(&page_title);

        self.test_page_in_flight = true;
        self.test_page_status = Some(format!("Sending test page to {address}."));

        Command::perform(
            async move {
                let label = address.to_string();
                match send_test_page(address, payload, TestPageConfig::default()).await {
                    Ok(()) => Ok(label),
                    Err(error) => Err(ErrorInfo::from_error(&error)),
                }
            },
            Message::TestPageFinished,
        )
    }

    fn setup_tab_view(&self) -> Element<'_, Message> {
        let left = column![self.registration_form_view(), self.scan_panel_view()]
            .spacing(16)
            .width(Length::FillPortion(1));

        row![left, self.registered_list_view()]
            .spacing(16)
            .align_items(Alignment::Start)
            .into()
    }

    fn field(
        &self,
        label: &str,
        placeholder: &str,
        value: &str,
        on_input: fn(String) -> Message,
    ) -> Element<'_, Message> {
        let input = text_input(placeholder, value)
            .on_input(on_input)
            .padding(6)
            .size(12)
            .width(Length::Fill);

        column![
            text(label)
                .size(12)
                .style(theme::Text::Color(Color::from_rgb8(0x3a, 0x4a, 0x5a))),
            input,
        ]
        .spacing(4)
        .into()
    }

    fn registration_form_view(&self) -> Element<'_, Message> {
        let test_page_button = if self.test_page_in_flight {
            button(text("Sending..."))
        } else {
            button(text("Send test page")).on_press(Message::SendTestPage)
        };

        let register_status = self.register_status.as_deref().unwrap_or("Ready.");
        let test_page_status = self.test_page_status.as_deref().unwrap_or("Ready.");

        let content = column![
            text("Printer registration")
                .size(16)
                .style(theme::Text::Color(Color::from_rgb8(0x12, 0x12, 0x12))),
            self.field("Name", "Front Office", &self.form.name, Message::FormNameChanged),
            self.field(
                "IP address",
                "192.168.1.50",
                &self.form.ip_address,
                Message::FormIpChanged
            ),
            self.field("Port", "9100", &self.port_text, Message::FormPortChanged),
            checkbox("Main printer", self.is_main).on_toggle(Message::FormMainToggled),
            row![
                button("Add printer").on_press(Message::RegisterPrinter),
                test_page_button,
            ]
            .spacing(8)
            .align_items(Alignment::Center),
            text(format!("Status: {register_status}"))
                .size(12)
                .style(theme::Text::Color(Color::from_rgb8(0x6a, 0x6a, 0x6a))),
            text(format!("Test page: {test_page_status}"))
                .size(12)
                .style(theme::Text::Color(Color::from_rgb8(0x6a, 0x6a, 0x6a))),
        ]
        .spacing(6);

        container(content)
            .padding(8)
            .style(theme::Container::Box)
            .into()
    }

    fn scan_panel_view(&self) -> Element<'_, Message> {
        let scan_button = if self.widget.is_scanning() {
            button(text(self.widget.button_label()))
        } else {
            button(text(self.widget.button_label())).on_press(Message::StartScan)
        };

        let mut content = column![
            text("Network scan")
                .size(16)
                .style(theme::Text::Color(Color::from_rgb8(0x12, 0x12, 0x12))),
            self.field(
                "Backend base URL",
                "http://127.0.0.1:8000/admin/printers/printer/",
                &self.base_url,
                Message::BaseUrlChanged
            ),
            self.field(
                "Timeout in seconds, empty for none",
                "",
                &self.scan_timeout_text,
                Message::ScanTimeoutChanged
            ),
            row![scan_button].spacing(8).align_items(Alignment::Center),
        ]
        .spacing(6);

        if let Some(records) = self.widget.records() {
            let dropdown = pick_list(
                records.to_vec(),
                self.picked.clone(),
                Message::PrinterPicked,
            )
            .placeholder(SCAN_PLACEHOLDER_LABEL)
            .text_size(12)
            .width(Length::Fill);
            content = content.push(dropdown);
        }

        let status = self.scan_status.as_deref().unwrap_or("Idle.");
        content = content.push(
            text(status)
                .size(12)
                .style(theme::Text::Color(Color::from_rgb8(0x6a, 0x6a, 0x6a))),
        );

        container(content)
            .padding(8)
            .style(theme::Container::Box)
            .into()
    }

    fn storage_controls_view(&self) -> Element<'_, Message> {
        let status = self.printers_status.as_deref().unwrap_or("Ready.");
        let path_input = text_input("printers.ron", &self.printers_path)
            .on_input(Message::PrintersPathChanged)
            .padding(6)
            .size(12)
            .width(Length::Fill);

        let path_controls = row![
            path_input,
            button("Load").on_press(Message::LoadPrinters),
            button("Save").on_press(Message::SavePrinters),
        ]
        .spacing(8)
        .align_items(Alignment::Center);

        let content = column![
            text("Printer list storage")
                .size(16)
                .style(theme::Text::Color(Color::from_rgb8(0x12, 0x12, 0x12))),
            column![
                text("RON path")
                    .size(12)
                    .style(theme::Text::Color(Color::from_rgb8(0x3a, 0x4a, 0x5a))),
                path_controls,
            ]
            .spacing(4),
            text(format!("Status: {status}"))
                .size(12)
                .style(theme::Text::Color(Color::from_rgb8(0x6a, 0x6a, 0x6a))),
        ]
        .spacing(6);

        container(content)
            .padding(8)
            .style(theme::Container::Box)
            .into()
    }

    fn registered_list_view(&self) -> Element<'_, Message> {
        let mut list_items = column![].spacing(6);

        if self.printers.is_empty() {
            list_items = list_items.push(
                text("No printers registered yet.")
                    .size(14)
                    .style(theme::Text::Color(Color::from_rgb8(0x4a, 0x4a, 0x4a))),
            );
        } else {
            for (index, printer) in self.printers.iter().enumerate() {
                list_items = list_items.push(self.printer_row(index, printer));
            }
        }

        let mut content = column![
            self.storage_controls_view(),
            text("Registered printers")
                .size(20)
                .style(theme::Text::Color(Color::from_rgb8(0x12, 0x12, 0x12))),
            list_items,
        ]
        .spacing(12);

        if self.selected_printer.is_some() {
            content = content.push(button("Delete selected").on_press(Message::DeleteSelectedPrinter));
        }

        let scroll = scrollable(content)
            .height(Length::Fill)
            .width(Length::Fill);

        container(scroll)
            .padding(12)
            .width(Length::FillPortion(1))
            .height(Length::Fill)
            .style(theme::Container::Box)
            .into()
    }

    fn printer_row(&self, index: usize, printer: &RegisteredPrinter) -> Element<'_, Message> {
        let is_selected = self.selected_printer == Some(index);
        let name = if printer.name.trim().is_empty() {
            "Unnamed printer"
        } else {
            printer.name.as_str()
        };
        let role = if printer.is_main {
            "Main printer"
        } else {
            "Secondary"
        };

        let content = column![
            text(name)
                .size(14)
                .style(theme::Text::Color(Color::from_rgb8(0x1f, 0x2a, 0x37))),
            text(printer.address().to_string())
                .size(12)
                .style(theme::Text::Color(Color::from_rgb8(0x4a, 0x4a, 0x4a))),
            text(role)
                .size(12)
                .style(theme::Text::Color(Color::from_rgb8(0x6a, 0x6a, 0x6a))),
        ]
        .spacing(2);

        let style = if is_selected {
            theme::Button::Primary
        } else {
            theme::Button::Secondary
        };

        button(content)
            .style(style)
            .width(Length::Fill)
            .on_press(Message::SelectPrinter(index))
            .into()
    }

    fn debug_tab_view(&self) -> Element<'_, Message> {
        let level_picker = pick_list(
            &LogLevel::ALL[..],
            Some(self.log_level),
            Message::LogLevelChanged,
        )
        .placeholder("Log level");

        let console_header = row![
            text("Console")
                .size(20)
                .style(theme::Text::Color(Color::from_rgb8(0x12, 0x12, 0x12))),
            level_picker
        ]
        .spacing(12)
        .align_items(Alignment::Center);

        let console = column![console_header, self.target_filters_view(), self.log_lines_view()]
            .spacing(12)
            .width(Length::FillPortion(2));

        row![console, self.debug_panel_view()]
            .spacing(16)
            .align_items(Alignment::Start)
            .into()
    }

    fn target_filters_view(&self) -> Element<'_, Message> {
        let mut filter_column = column![
            text("Targets")
                .size(14)
                .style(theme::Text::Color(Color::from_rgb8(0x3a, 0x4a, 0x5a)))
        ]
        .spacing(6);

        for target in self.sorted_targets() {
            let enabled = self.enabled_targets.contains(&target);
            filter_column = filter_column.push(
                checkbox(target.clone(), enabled)
                    .on_toggle(move |value| Message::ToggleTarget(target.clone(), value)),
            );
        }

        container(filter_column)
            .padding(8)
            .style(theme::Container::Box)
            .into()
    }

    fn log_lines_view(&self) -> Element<'_, Message> {
        let mut lines = column![].spacing(4);

        for entry in self.visible_entries() {
            let color = level_color(entry.level);
            let line = text(entry.format_line())
                .size(14)
                .horizontal_alignment(Horizontal::Left)
                .style(theme::Text::Color(color));
            lines = lines.push(line);
        }

        scrollable(lines)
            .height(Length::Fill)
            .width(Length::Fill)
            .into()
    }

    fn debug_panel_view(&self) -> Element<'_, Message> {
        let copy_status = self.copy_status.as_deref().unwrap_or("Ready");
        let dropdown_state = match self.widget.records() {
            Some(records) => format!("{} entries", records.len()),
            None => "hidden".to_string(),
        };

        let panel = column![
            text("Debug panel")
                .size(20)
                .style(theme::Text::Color(Color::from_rgb8(0x12, 0x12, 0x12))),
            text(format!("Registered printers: {}", self.printers.len()))
                .size(14)
                .style(theme::Text::Color(Color::from_rgb8(0x4a, 0x4a, 0x4a))),
            text(format!("Scan dropdown: {dropdown_state}"))
                .size(14)
                .style(theme::Text::Color(Color::from_rgb8(0x4a, 0x4a, 0x4a))),
            text(format!("Scan endpoint: {}", self.scan_config().endpoint_url()))
                .size(14)
                .style(theme::Text::Color(Color::from_rgb8(0x4a, 0x4a, 0x4a))),
            button("Copy diagnostics").on_press(Message::CopyDiagnostics),
            text(format!("Clipboard: {copy_status}"))
                .size(12)
                .style(theme::Text::Color(Color::from_rgb8(0x6a, 0x6a, 0x6a))),
        ]
        .spacing(10);

        container(panel)
            .padding(12)
            .width(Length::FillPortion(1))
            .style(theme::Container::Box)
            .into()
    }

    fn sorted_targets(&self) -> Vec<String> {
        let mut targets: Vec<String> = self.known_targets.iter().cloned().collect();
        targets.sort();
        targets
    }

    fn visible_entries(&self) -> Vec<&LogEntry> {
        self.log_entries
            .iter()
            .filter(|entry| self.enabled_targets.contains(&entry.target))
            .collect()
    }

    fn copy_diagnostics(&self) -> String {
        let text = self.diagnostics_text();
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
            Ok(()) => {
                tracing::info!(target: targets::UI, "Diagnostics copied to clipboard");
                "Copied".to_string()
            }
            Err(error) => {
                tracing::warn!(target: targets::UI, "Clipboard copy failed: {}", error);
                format!("Failed: {error}")
            }
        }
    }

    fn diagnostics_text(&self) -> String {
        let mut output = String::new();
        output.push_str("Printer Setup diagnostics\n");
        output.push_str(&format!("Log level: {}\n", self.log_level));
        output.push_str(&format!(
            "Scan endpoint: {}\n",
            self.scan_config().endpoint_url()
        ));
        output.push_str(&format!("Registered printers: {}\n", self.printers.len()));
        output.push_str(&format!(
            "Targets enabled: {}\n",
            self.sorted_targets()
                .into_iter()
                .filter(|target| self.enabled_targets.contains(target))
                .collect::<Vec<String>>()
                .join(", ")
        ));
        output.push_str("Recent logs:\n");

        let entries = self.visible_entries();
        let start = entries.len().saturating_sub(RECENT_LOG_LINES);
        for entry in entries.into_iter().skip(start) {
            output.push_str(&entry.format_line());
            output.push('\n');
        }

        output
    }
}

fn level_color(level: tracing::Level) -> Color {
    if level == tracing::Level::ERROR {
        Color::from_rgb8(0xe0, 0x4f, 0x4f)
    } else if level == tracing::Level::WARN {
        Color::from_rgb8(0xd9, 0x82, 0x2b)
    } else if level == tracing::Level::INFO {
        Color::from_rgb8(0x1f, 0x2a, 0x37)
    } else if level == tracing::Level::DEBUG {
        Color::from_rgb8(0x3a, 0x4a, 0x5a)
    } else {
        Color::from_rgb8(0x6a, 0x6a, 0x6a)
    }
}
