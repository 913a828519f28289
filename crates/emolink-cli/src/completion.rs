pub const BASH_COMPLETION: &str = r#"_emolink() {
    local cur prev commands
    COMPREPLY=()
    cur="${COMP_WORDS[COMP_CWORD]}"
    prev="${COMP_WORDS[COMP_CWORD-1]}"
    commands="compose preview open templates version help completion"

    if [[ ${COMP_CWORD} -eq 1 ]]; then
        COMPREPLY=($(compgen -W "${commands}" -- "${cur}"))
        return 0
    fi

    case "${prev}" in
        compose)
            COMPREPLY=($(compgen -W "--template --to --message --from --qr --copy --share --base-url --json --help" -- "${cur}"))
            ;;
        preview)
            COMPREPLY=($(compgen -W "--template --to --message --from --play --json --help" -- "${cur}"))
            ;;
        open)
            COMPREPLY=($(compgen -W "--play --json --help" -- "${cur}"))
            ;;
        templates)
            COMPREPLY=($(compgen -W "--json --help" -- "${cur}"))
            ;;
        -t|--template)
            COMPREPLY=($(compgen -W "birthday proposal apology graduation anniversary" -- "${cur}"))
            ;;
        completion)
            COMPREPLY=($(compgen -W "bash zsh fish" -- "${cur}"))
            ;;
    esac
    return 0
}
complete -F _emolink emolink
"#;

pub const ZSH_COMPLETION: &str = r#"#compdef emolink

_emolink() {
    local -a commands templates
    commands=(
        'compose:Build a shareable card link'
        'preview:Show a card without building a link'
        'open:Open a card link in the terminal'
        'templates:List card templates'
        'version:Show version'
        'help:Show help'
        'completion:Output shell completion script'
    )
    templates=(birthday proposal apology graduation anniversary)

    _arguments -C \
        '1:command:->command' \
        '*::arg:->args'

    case "$state" in
        command)
            _describe 'command' commands
            ;;
        args)
            case $words[1] in
                compose|preview)
                    _arguments \
                        {-t,--template}'[Template id]:template:($templates)' \
                        '--to[Receiver name]:name:' \
                        {-m,--message}'[Message text]:text:' \
                        '--from[Sender name]:name:' \
                        {-Q,--qr}'[Display link as QR code]' \
                        {-c,--copy}'[Copy link to clipboard]' \
                        '--share[Print WhatsApp share link]' \
                        {-p,--play}'[Run the countdown]' \
                        '--base-url[Page URL]:url:' \
                        '--json[Output as JSON]' \
                        '--help[Show help]'
                    ;;
                open)
                    _arguments \
                        '1:link or token:' \
                        {-p,--play}'[Run the countdown]' \
                        '--json[Output as JSON]' \
                        '--help[Show help]'
                    ;;
                templates)
                    _arguments '--json[Output as JSON]' '--help[Show help]'
                    ;;
                completion)
                    _arguments '1:shell:(bash zsh fish)'
                    ;;
            esac
            ;;
    esac
}

_emolink "$@"
"#;

pub const FISH_COMPLETION: &str = r#"set -l commands compose preview open templates version help completion
complete -c emolink -f
complete -c emolink -n "not __fish_seen_subcommand_from $commands" -a compose -d 'Build a shareable card link'
complete -c emolink -n "not __fish_seen_subcommand_from $commands" -a preview -d 'Show a card without building a link'
complete -c emolink -n "not __fish_seen_subcommand_from $commands" -a open -d 'Open a card link in the terminal'
complete -c emolink -n "not __fish_seen_subcommand_from $commands" -a templates -d 'List card templates'
complete -c emolink -n "not __fish_seen_subcommand_from $commands" -a version -d 'Show version'
complete -c emolink -n "not __fish_seen_subcommand_from $commands" -a help -d 'Show help'
complete -c emolink -n "not __fish_seen_subcommand_from $commands" -a completion -d 'Output shell completion script'
complete -c emolink -n "__fish_seen_subcommand_from compose preview" -s t -l template -x -a 'birthday proposal apology graduation anniversary' -d 'Template id'
complete -c emolink -n "__fish_seen_subcommand_from compose preview" -l to -x -d 'Receiver name'
complete -c emolink -n "__fish_seen_subcommand_from compose preview" -s m -l message -x -d 'Message text'
complete -c emolink -n "__fish_seen_subcommand_from compose preview" -l from -x -d 'Sender name'
complete -c emolink -n "__fish_seen_subcommand_from compose" -s Q -l qr -d 'Display link as QR code'
complete -c emolink -n "__fish_seen_subcommand_from compose" -s c -l copy -d 'Copy link to clipboard'
complete -c emolink -n "__fish_seen_subcommand_from compose" -l share -d 'Print WhatsApp share link'
complete -c emolink -n "__fish_seen_subcommand_from compose" -l base-url -x -d 'Page URL'
complete -c emolink -n "__fish_seen_subcommand_from open preview" -s p -l play -d 'Run the countdown'
complete -c emolink -n "__fish_seen_subcommand_from compose preview open templates" -l json -d 'Output as JSON'
complete -c emolink -n "__fish_seen_subcommand_from completion" -a 'bash zsh fish'
"#;
