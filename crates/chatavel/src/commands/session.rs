use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use clap::ArgMatches;
use tracing::debug;

use chatavel_core::auth::{AuthProvider, ProviderProfile};
use chatavel_core::config::{EscapeScope, GroupConfig};
use chatavel_core::events::{
    log_session_action_failed, log_session_completed, log_session_line_rejected,
    log_session_started,
};
use chatavel_core::state::dispatch_infallible;
use chatavel_core::views::{SurfaceOptions, TaskbarOptions};
use chatavel_core::{
    AuthBackend, AuthSession, ChatThread, ChatavelConfig, Command, Event, Feature, FeatureContent,
    GroupError, GroupRoster, HeadlessPage, InMemoryAuthBackend, SurfaceGesture, SurfaceWindow,
    Taskbar, TaskbarGesture, WindowManager, WindowSurface, feature_window,
};

use super::helpers::load_config_with_warning;
use crate::render::Frame;
use crate::script::{HELP, ScriptCommand, parse_line};

pub(crate) fn handle_session_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    let mut config = load_config_with_warning();
    if let Some(scope) = matches.get_one::<String>("escape-scope") {
        config.surface.escape_scope = Some(scope.parse::<EscapeScope>()?);
    }
    if matches.get_flag("no-minimize") {
        config.surface.show_minimize = Some(false);
    }

    log_session_started(
        json_output,
        config.surface.escape_scope(),
        config.surface.show_minimize(),
    );

    let mut session = WindowSession::new(&config, json_output);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match matches.get_one::<String>("script") {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| format!("Could not open script '{}': {}", path, e))?;
            session.run(BufReader::new(file), &mut out)?;
        }
        None => session.run(io::stdin().lock(), &mut out)?,
    }

    log_session_completed(session.steps, session.manager.windows().len());

    Ok(())
}

/// A window manager wired to a headless surface, a taskbar and an auth session.
///
/// The chat thread and group roster live here and outlive their windows, so
/// closing and reopening a window shows the same messages and members.
pub(crate) struct WindowSession {
    manager: WindowManager<FeatureContent>,
    surface: WindowSurface<HeadlessPage>,
    taskbar_options: TaskbarOptions,
    group: GroupConfig,
    chat: ChatThread,
    roster: GroupRoster,
    auth: AuthSession<InMemoryAuthBackend>,
    json_output: bool,
    windows: Vec<SurfaceWindow<FeatureContent>>,
    taskbar: Option<Taskbar>,
    steps: usize,
}

impl WindowSession {
    pub(crate) fn new(config: &ChatavelConfig, json_output: bool) -> Self {
        Self {
            manager: WindowManager::new(),
            surface: WindowSurface::new(
                HeadlessPage::new(),
                SurfaceOptions::from(&config.surface),
            ),
            taskbar_options: TaskbarOptions::from(&config.taskbar),
            group: config.group.clone(),
            chat: ChatThread::new(),
            roster: GroupRoster::from_config(&config.group),
            auth: AuthSession::new(InMemoryAuthBackend::new()),
            json_output,
            windows: Vec::new(),
            taskbar: None,
            steps: 0,
        }
    }

    /// Execute every line of `input`, writing frames to `out`. Stops at `quit`.
    pub(crate) fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        for (index, line) in input.lines().enumerate() {
            let line = line?;
            match parse_line(&line) {
                Ok(None) => continue,
                Ok(Some(ScriptCommand::Quit)) => break,
                Ok(Some(command)) => {
                    self.steps += 1;
                    self.execute(command, out)?;
                }
                Err(message) => {
                    log_session_line_rejected(index + 1, &message);
                    eprintln!("Error (line {}): {}", index + 1, message);
                }
            }
        }
        out.flush()
    }

    fn execute<W: Write>(&mut self, command: ScriptCommand, out: &mut W) -> io::Result<()> {
        match command {
            ScriptCommand::Open(feature) => {
                let spec = feature_window(feature, self.content_for(feature));
                self.apply(vec![Command::OpenWindow(spec)], out)
            }
            ScriptCommand::Close(id) => self.gesture(SurfaceGesture::CloseButton(id), out),
            ScriptCommand::Minimize(id) => self.gesture(SurfaceGesture::MinimizeButton(id), out),
            ScriptCommand::Restore(id) => self.apply(vec![Command::restore(id)], out),
            ScriptCommand::Click(id) => self.taskbar_gesture(TaskbarGesture::Primary(id), out),
            ScriptCommand::RightClick(id) => {
                self.taskbar_gesture(TaskbarGesture::Secondary(id), out)
            }
            ScriptCommand::Backdrop(id) => self.gesture(SurfaceGesture::Backdrop(id), out),
            ScriptCommand::Body(id) => self.gesture(SurfaceGesture::BodyClick(id), out),
            ScriptCommand::Escape => self.gesture(SurfaceGesture::Escape, out),
            ScriptCommand::Clear => self.apply(vec![Command::ClearAllWindows], out),
            ScriptCommand::Show => self.render(&[], out),
            ScriptCommand::Say(text) => self.say(&text, out),
            ScriptCommand::Invite(email) => {
                self.group_action("invite", out, |roster| roster.invite(&email))
            }
            ScriptCommand::Join { email, name } => self.group_action("join", out, |roster| {
                roster.accept_invitation(&email, &name).map(|_| ())
            }),
            ScriptCommand::Role { member, role } => self.group_action("role", out, |roster| {
                roster.change_role(&member, role).map(|_| ())
            }),
            ScriptCommand::Remove(member) => self.group_action("remove", out, |roster| {
                roster.request_removal(&member).map(|_| ())
            }),
            ScriptCommand::Confirm => self.group_action("confirm", out, |roster| {
                roster.confirm_removal().map(|_| ())
            }),
            ScriptCommand::Cancel => self.group_action("cancel", out, |roster| {
                roster.cancel_removal();
                Ok(())
            }),
            ScriptCommand::Rename(name) => {
                self.group_action("rename", out, |roster| roster.rename(&name))
            }
            ScriptCommand::Describe(text) => self.group_action("describe", out, |roster| {
                roster.set_description(&text);
                Ok(())
            }),
            ScriptCommand::Toggle { toggle, enabled } => {
                self.group_action("set", out, |roster| {
                    roster.set_toggle(toggle, enabled);
                    Ok(())
                })
            }
            ScriptCommand::SignUp {
                email,
                password,
                display_name,
            } => {
                self.auth.sign_up(&email, &password, &display_name);
                self.render_auth(out)
            }
            ScriptCommand::SignIn { email, password } => {
                self.auth.sign_in(&email, &password);
                self.render_auth(out)
            }
            ScriptCommand::Google {
                email,
                display_name,
            } => {
                self.auth.sign_in_with_provider(&ProviderProfile {
                    provider: AuthProvider::Google,
                    email,
                    display_name,
                    photo_url: None,
                });
                self.render_auth(out)
            }
            ScriptCommand::Guest => {
                self.auth.sign_in_as_guest();
                self.render_auth(out)
            }
            ScriptCommand::SignOut => {
                self.auth.sign_out();
                self.render_auth(out)
            }
            ScriptCommand::WhoAmI => self.render_auth(out),
            ScriptCommand::Help => writeln!(out, "{}", HELP),
            ScriptCommand::Quit => Ok(()),
        }
    }

    /// Current body for `feature`. The first signed-in member to open the
    /// group window becomes its owner.
    fn content_for(&mut self, feature: Feature) -> FeatureContent {
        match feature {
            Feature::Chat => FeatureContent::Chat(self.chat.clone()),
            Feature::Group => {
                if let Some(user) = self.auth.user()
                    && !user.email.is_empty()
                {
                    self.roster.add_owner(&user.display_name, &user.email);
                }
                FeatureContent::GroupManagement(self.roster.clone())
            }
            _ => FeatureContent::initial(feature, &self.group),
        }
    }

    fn is_rendered(&self, feature: Feature) -> bool {
        self.windows.iter().any(|w| w.id == feature.as_str())
    }

    /// Typing needs the chat window on screen.
    fn say<W: Write>(&mut self, text: &str, out: &mut W) -> io::Result<()> {
        if !self.is_rendered(Feature::Chat) {
            return self.reject("say", "The chat window is not open");
        }

        let sender = self
            .auth
            .user()
            .map(|user| user.display_name.clone())
            .unwrap_or_else(|| "Me".to_string());
        if self.chat.send(&sender, text).is_none() {
            debug!(event = "cli.session_message_skipped", reason = "blank");
            return self.render(&[], out);
        }
        self.refresh(Feature::Chat, out)
    }

    /// Run a roster edit while the group window is on screen, then redraw it.
    fn group_action<W, F>(&mut self, action: &str, out: &mut W, edit: F) -> io::Result<()>
    where
        W: Write,
        F: FnOnce(&mut GroupRoster) -> Result<(), GroupError>,
    {
        if !self.is_rendered(Feature::Group) {
            return self.reject(action, "The group window is not open");
        }
        match edit(&mut self.roster) {
            Ok(()) => self.refresh(Feature::Group, out),
            Err(e) => self.reject(action, &e.to_string()),
        }
    }

    fn reject(&self, action: &str, message: &str) -> io::Result<()> {
        log_session_action_failed(action, message);
        eprintln!("Error: {}", message);
        Ok(())
    }

    /// Swap in fresh content for an open feature window. The window keeps its
    /// place, so this is not reported as an event.
    fn refresh<W: Write>(&mut self, feature: Feature, out: &mut W) -> io::Result<()> {
        let spec = feature_window(feature, self.content_for(feature));
        self.manager.open(spec);
        self.redraw(&[], out)
    }

    fn gesture<W: Write>(&mut self, gesture: SurfaceGesture, out: &mut W) -> io::Result<()> {
        let commands = self.surface.route::<FeatureContent>(&gesture);
        if commands.is_empty() {
            debug!(event = "cli.session_gesture_ignored", gesture = ?gesture);
        }
        self.apply(commands, out)
    }

    /// Taskbar icons only exist for minimized windows; clicks on anything
    /// else hit nothing.
    fn taskbar_gesture<W: Write>(&mut self, gesture: TaskbarGesture, out: &mut W) -> io::Result<()> {
        let id = match &gesture {
            TaskbarGesture::Primary(id) | TaskbarGesture::Secondary(id) => id,
        };
        let on_taskbar = self
            .taskbar
            .as_ref()
            .is_some_and(|taskbar| taskbar.item(id.as_str()).is_some());

        if on_taskbar {
            self.apply(vec![gesture.into_command()], out)
        } else {
            debug!(event = "cli.session_gesture_ignored", gesture = ?gesture);
            self.apply(Vec::new(), out)
        }
    }

    fn apply<W: Write>(
        &mut self,
        commands: Vec<Command<FeatureContent>>,
        out: &mut W,
    ) -> io::Result<()> {
        let mut events = Vec::new();
        for command in commands {
            events.extend(dispatch_infallible(&mut self.manager, command));
        }
        self.redraw(&events, out)
    }

    fn redraw<W: Write>(&mut self, events: &[Event], out: &mut W) -> io::Result<()> {
        self.windows = self.surface.sync(self.manager.windows());
        self.taskbar = Taskbar::project(self.manager.windows(), &self.taskbar_options);
        self.render(events, out)
    }

    fn render<W: Write>(&self, events: &[Event], out: &mut W) -> io::Result<()> {
        let frame = Frame::new(
            events,
            &self.windows,
            self.taskbar.as_ref(),
            self.surface.page(),
        );
        if self.json_output {
            let json = frame.to_json().map_err(io::Error::other)?;
            writeln!(out, "{}", json)
        } else {
            writeln!(out, "{}", frame.to_text())
        }
    }

    fn render_auth<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.json_output {
            let json = serde_json::json!({ "auth": self.auth.state() });
            return writeln!(out, "{}", json);
        }

        if let Some(error) = self.auth.error() {
            eprintln!("Error: {}", error);
        }
        match self.auth.user() {
            Some(user) => {
                let anonymous = self
                    .auth
                    .backend()
                    .current_identity()
                    .is_some_and(|identity| identity.is_anonymous);
                if anonymous {
                    writeln!(out, "Signed in as {} (guest)", user.display_name)
                } else {
                    writeln!(out, "Signed in as {} <{}>", user.display_name, user.email)
                }
            }
            None => writeln!(out, "Not signed in"),
        }
    }
}
